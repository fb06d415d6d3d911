#[cfg(test)]
mod parser_tests {
    use pretty_assertions::assert_eq;

    use treelox::ast_printer::AstPrinter;
    use treelox::error::Diagnostics;
    use treelox::expr::{Expr, ExprId};
    use treelox::parser::Parser;
    use treelox::scanner::scan_tokens;
    use treelox::stmt::Stmt;

    fn parse(source: &str) -> (Vec<Stmt>, Vec<String>) {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan_tokens(source, &mut diagnostics);
        let statements = Parser::new(&tokens, &mut diagnostics).parse();
        let errors = diagnostics.errors().iter().map(|e| e.to_string()).collect();

        (statements, errors)
    }

    fn printed(source: &str) -> Vec<String> {
        let (statements, errors) = parse(source);
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);

        statements.iter().map(AstPrinter::print_stmt).collect()
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(printed("1 + 2 * 3;"), vec!["(; (+ 1.0 (* 2.0 3.0)))"]);
        assert_eq!(printed("(1 + 2) * 3;"), vec!["(; (* (group (+ 1.0 2.0)) 3.0))"]);
    }

    #[test]
    fn binary_operators_are_left_associative() {
        assert_eq!(printed("10 - 2 - 3;"), vec!["(; (- (- 10.0 2.0) 3.0))"]);
        assert_eq!(printed("1 < 2 == true;"), vec!["(; (== (< 1.0 2.0) true))"]);
    }

    #[test]
    fn assignment_is_right_associative() {
        assert_eq!(printed("a = b = 1;"), vec!["(; (= a (= b 1.0)))"]);
    }

    #[test]
    fn unary_operators_nest() {
        assert_eq!(printed("!!true;"), vec!["(; (! (! true)))"]);
        assert_eq!(printed("-a * b;"), vec!["(; (* (- a) b))"]);
    }

    #[test]
    fn and_binds_tighter_than_or() {
        assert_eq!(
            printed("a or b and c;"),
            vec!["(; (or a (and b c)))"]
        );
    }

    #[test]
    fn for_loop_is_lowered_to_while_inside_a_block() {
        assert_eq!(
            printed("for (var i = 0; i < 3; i = i + 1) print i;"),
            vec!["(block (var i 0.0) (while (< i 3.0) (block (print i) (; (= i (+ i 1.0))))))"]
        );
    }

    #[test]
    fn for_loop_without_clauses_loops_on_true() {
        assert_eq!(printed("for (;;) print 1;"), vec!["(while true (print 1.0))"]);
    }

    #[test]
    fn calls_and_property_access_chain_left_to_right() {
        assert_eq!(
            printed("a.b(1, 2).c;"),
            vec!["(; (. (call (. a b) 1.0 2.0) c))"]
        );
        assert_eq!(printed("a.b = c;"), vec!["(; (= (. a b) c))"]);
    }

    #[test]
    fn class_declaration_with_superclass_and_methods() {
        assert_eq!(
            printed("class B < A { init(x) { this.x = x; } m() { return super.m(); } }"),
            vec![
                "(class B < A (method init(x) (; (= (. this x) x))) (method m() (return (call (super m)))))"
            ]
        );
    }

    #[test]
    fn dangling_else_binds_to_nearest_if() {
        assert_eq!(
            printed("if (a) if (b) print 1; else print 2;"),
            vec!["(if a (if b (print 1.0) (print 2.0)))"]
        );
    }

    #[test]
    fn recovers_at_statement_boundary_and_keeps_going() {
        let (statements, errors) = parse("var = 1; print 2; var x = ;");

        assert_eq!(
            errors,
            vec![
                "[line 1] Error at '=': Expect variable name.",
                "[line 1] Error at ';': Expect expression.",
            ]
        );
        assert_eq!(statements.len(), 1);
        assert_eq!(AstPrinter::print_stmt(&statements[0]), "(print 2.0)");
    }

    #[test]
    fn missing_semicolon_at_end_points_at_end() {
        let (_, errors) = parse("print 1");

        assert_eq!(errors, vec!["[line 1] Error at end: Expect ';' after value."]);
    }

    #[test]
    fn invalid_assignment_target_is_reported_without_unwinding() {
        let (statements, errors) = parse("1 + 2 = 3; print 4;");

        assert_eq!(errors, vec!["[line 1] Error at '=': Invalid assignment target."]);
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn too_many_arguments_is_reported_but_call_still_parses() {
        let args: Vec<String> = (0..256).map(|i| i.to_string()).collect();
        let source = format!("f({});", args.join(", "));

        let (statements, errors) = parse(&source);

        assert_eq!(errors.len(), 1);
        assert!(errors[0].ends_with("Can't have more than 255 arguments."));
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn too_many_parameters_is_reported() {
        let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
        let source = format!("fun f({}) {{}}", params.join(", "));

        let (statements, errors) = parse(&source);

        assert_eq!(errors.len(), 1);
        assert!(errors[0].ends_with("Can't have more than 255 parameters."));
        assert_eq!(statements.len(), 1);
    }

    fn variable_ids(statements: &[Stmt]) -> Vec<ExprId> {
        statements
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Expression(Expr::Variable { id, .. }) => Some(*id),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn identical_references_get_distinct_ids() {
        let (statements, _) = parse("a; a; a;");
        let ids = variable_ids(&statements);

        assert_eq!(ids.len(), 3);
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
        assert_ne!(ids[0], ids[2]);
    }

    #[test]
    fn numbering_continues_from_an_earlier_parse() {
        let mut diagnostics = Diagnostics::new();

        let first_tokens = scan_tokens("a; b;", &mut diagnostics);
        let mut first = Parser::new(&first_tokens, &mut diagnostics);
        let first_ids = variable_ids(&first.parse());
        let resume = first.next_id();

        let second_tokens = scan_tokens("a; b;", &mut diagnostics);
        let second_ids =
            variable_ids(&Parser::new(&second_tokens, &mut diagnostics).starting_at(resume).parse());

        for id in &second_ids {
            assert!(!first_ids.contains(id), "id {:?} reused", id);
        }
    }

    #[test]
    fn single_expression_mode_rejects_trailing_tokens() {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan_tokens("1 + 2", &mut diagnostics);
        let expr = Parser::new(&tokens, &mut diagnostics).parse_expression();
        assert_eq!(expr.map(|e| AstPrinter::print(&e)), Some("(+ 1.0 2.0)".to_string()));

        let mut diagnostics = Diagnostics::new();
        let tokens = scan_tokens("1 + 2;", &mut diagnostics);
        let expr = Parser::new(&tokens, &mut diagnostics).parse_expression();
        assert!(expr.is_none());
        assert_eq!(
            diagnostics.errors()[0].to_string(),
            "[line 1] Error at ';': Expect end of expression."
        );
    }
}
