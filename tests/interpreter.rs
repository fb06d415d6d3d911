mod common;

#[cfg(test)]
mod interpreter_tests {
    use pretty_assertions::assert_eq;

    use crate::common::{output_of, run, runtime_error, session, static_errors};
    use treelox::RunError;

    #[test]
    fn arithmetic_follows_precedence_and_associativity() {
        assert_eq!(
            output_of("print 1 + 2 * 3; print (1 + 2) * 3; print 10 - 2 - 3; print 8 / 2 / 2;"),
            vec!["7", "9", "5", "2"]
        );
    }

    #[test]
    fn numbers_render_without_trailing_zero() {
        assert_eq!(
            output_of("print 3.0; print 2.5; print -0; print 1 / 3 * 3; print 0.1 + 0.2;"),
            vec!["3", "2.5", "-0", "1", "0.30000000000000004"]
        );
    }

    #[test]
    fn division_by_zero_follows_ieee() {
        assert_eq!(
            output_of("print 1 / 0; print -1 / 0; print 0 / 0;"),
            vec!["Infinity", "-Infinity", "NaN"]
        );
    }

    #[test]
    fn only_nil_and_false_are_falsey() {
        assert_eq!(
            output_of(
                r#"
                print !nil; print !false; print !0; print !"";
                if (0) print "zero is true";
                if ("") print "empty is true";
                "#
            ),
            vec!["true", "true", "false", "false", "zero is true", "empty is true"]
        );
    }

    #[test]
    fn equality_never_converts_types() {
        assert_eq!(
            output_of(r#"print nil == nil; print 1 == "1"; print "a" == "a"; print nil == false; print 1 != 2;"#),
            vec!["true", "false", "true", "false", "true"]
        );
    }

    #[test]
    fn logical_operators_return_an_operand_and_short_circuit() {
        assert_eq!(
            output_of(
                r#"
                print nil or "fallback";
                print 1 and 2;
                print false and undefined_function();
                print "first" or undefined_function();
                "#
            ),
            vec!["fallback", "2", "false", "first"]
        );
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(output_of(r#"var a = "con"; print a + "cat";"#), vec!["concat"]);
    }

    #[test]
    fn inner_scopes_shadow_without_clobbering() {
        assert_eq!(
            output_of(
                r#"
                var a = "global";
                {
                  var a = "outer";
                  {
                    var a = "inner";
                    print a;
                  }
                  print a;
                }
                print a;
                "#
            ),
            vec!["inner", "outer", "global"]
        );
    }

    #[test]
    fn closures_bind_statically_not_dynamically() {
        assert_eq!(
            output_of(
                r#"
                var a = "global";
                {
                  fun showA() { print a; }
                  showA();
                  var a = "block";
                  showA();
                }
                "#
            ),
            vec!["global", "global"]
        );
    }

    #[test]
    fn each_loop_iteration_body_gets_a_fresh_scope() {
        assert_eq!(
            output_of(
                r#"
                var first; var second;
                for (var i = 0; i < 2; i = i + 1) {
                  var captured = i;
                  fun read() { print captured; }
                  if (i == 0) first = read; else second = read;
                }
                first(); second();
                "#
            ),
            vec!["0", "1"]
        );
    }

    #[test]
    fn loop_variable_is_shared_across_iterations() {
        assert_eq!(
            output_of(
                r#"
                var read;
                for (var i = 0; i < 3; i = i + 1) {
                  fun f() { print i; }
                  if (i == 0) read = f;
                }
                read();
                "#
            ),
            vec!["3"]
        );
    }

    #[test]
    fn counter_closure_keeps_its_own_state() {
        assert_eq!(
            output_of(
                r#"
                fun makeCounter() {
                  var count = 0;
                  fun increment() { count = count + 1; return count; }
                  return increment;
                }
                var a = makeCounter();
                var b = makeCounter();
                print a(); print a(); print b();
                "#
            ),
            vec!["1", "2", "1"]
        );
    }

    #[test]
    fn recursion_and_early_return_from_loops() {
        assert_eq!(
            output_of(
                r#"
                fun fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); }
                print fib(15);
                fun firstOver(limit) {
                  var i = 0;
                  while (true) {
                    i = i + 1;
                    if (i * i > limit) return i;
                  }
                }
                print firstOver(50);
                fun nothing() {}
                print nothing();
                "#
            ),
            vec!["610", "8", "nil"]
        );
    }

    #[test]
    fn callables_and_instances_print_by_kind() {
        assert_eq!(
            output_of("fun f() {} class K {} print f; print K; print K(); print clock;"),
            vec!["<fn f>", "K", "K instance", "<native fn>"]
        );
    }

    #[test]
    fn clock_reports_seconds() {
        assert_eq!(output_of("print clock() > 0;"), vec!["true"]);
    }

    #[test]
    fn fields_and_bound_methods() {
        assert_eq!(
            output_of(
                r#"
                class Box {
                  describe() { return "box of " + this.item; }
                }
                var b = Box();
                b.item = "tea";
                var describe = b.describe;
                b.item = "coffee";
                print describe();
                "#
            ),
            vec!["box of coffee"]
        );
    }

    #[test]
    fn fields_shadow_methods() {
        assert_eq!(
            output_of(
                r#"
                class A { m() { return "method"; } }
                var a = A();
                a.m = "field";
                print a.m;
                "#
            ),
            vec!["field"]
        );
    }

    #[test]
    fn initializer_runs_on_construction_and_always_returns_this() {
        assert_eq!(
            output_of(
                r#"
                class Point {
                  init(x) {
                    this.x = x;
                    return;
                    print "unreachable";
                  }
                }
                var p = Point(3);
                print p.x;
                print p;
                print p.init(4) == p;
                print p.x;
                "#
            ),
            vec!["3", "Point instance", "true", "4"]
        );
    }

    #[test]
    fn inherited_methods_and_super_calls() {
        assert_eq!(
            output_of(
                r#"
                class A { method() { print "A method " + this.name; } }
                class B < A {
                  method() { print "B method"; super.method(); }
                }
                var b = B();
                b.name = "bee";
                b.method();
                "#
            ),
            vec!["B method", "A method bee"]
        );
    }

    #[test]
    fn super_is_bound_to_the_declaring_class() {
        assert_eq!(
            output_of(
                r#"
                class A { say() { print "A"; } }
                class B < A {
                  say() { print "B"; }
                  test() { super.say(); }
                }
                class C < B { say() { print "C"; } }
                C().test();
                "#
            ),
            vec!["A"]
        );
    }

    #[test]
    fn subclass_inherits_initializer_arity() {
        assert_eq!(
            output_of(
                r#"
                class Base { init(a, b) { this.sum = a + b; } }
                class Derived < Base {}
                print Derived(1, 2).sum;
                "#
            ),
            vec!["3"]
        );
    }

    #[test]
    fn arity_mismatch_fails_before_the_body_runs() {
        let (lines, error) = runtime_error(r#"fun f(a, b) { print "side effect"; } f(1);"#);

        assert_eq!(lines, Vec::<String>::new());
        assert_eq!(error.message(), "Expected 2 arguments but got 1.");

        let (_, error) = runtime_error("class P { init(x) {} } P();");
        assert_eq!(error.message(), "Expected 1 arguments but got 0.");

        let (_, error) = runtime_error("class Q {} Q(1);");
        assert_eq!(error.message(), "Expected 0 arguments but got 1.");
    }

    #[test]
    fn runtime_type_errors() {
        let cases = [
            (r#"print -"x";"#, "Operand must be a number."),
            (r#"print 1 + "a";"#, "Operands must be two numbers or two strings."),
            ("print 1 < nil;", "Operands must be numbers."),
            (r#"print "a" * 2;"#, "Operands must be numbers."),
            ("print 2 - true;", "Operands must be numbers."),
            ("print missing;", "Undefined variable 'missing'."),
            ("missing = 1;", "Undefined variable 'missing'."),
            ("nil();", "Can only call functions and classes."),
            (r#""str"();"#, "Can only call functions and classes."),
            ("var x = 1; print x.y;", "Only instances have properties."),
            ("var x = 1; x.y = 2;", "Only instances have fields."),
            ("class A {} print A().nope;", "Undefined property 'nope'."),
            ("var N = 1; class A < N {}", "Superclass must be a class."),
        ];

        for (source, message) in cases {
            let (_, error) = runtime_error(source);
            assert_eq!(error.message(), message, "source: {}", source);
        }
    }

    #[test]
    fn runtime_error_reports_its_line_and_stops_the_program() {
        let (lines, error) = runtime_error("print 1;\nprint nil + 1;\nprint 2;");

        assert_eq!(lines, vec!["1"]);
        assert_eq!(error.line(), Some(2));
        assert_eq!(
            error.to_string(),
            "Operands must be two numbers or two strings.\n[line 2]"
        );
    }

    #[test]
    fn static_errors_prevent_any_execution() {
        let (lines, outcome) = run("print \"before\";\nvar a = a;");

        assert_eq!(lines, Vec::<String>::new());
        match outcome {
            Err(e @ RunError::Static(_)) => assert_eq!(e.exit_code(), 65),
            other => panic!("expected static error, got {:?}", other),
        }
    }

    #[test]
    fn scan_and_parse_errors_are_all_reported() {
        assert_eq!(
            static_errors("print @;\nprint (1;"),
            vec![
                "[line 1] Error: Unexpected character: @",
                "[line 1] Error at ';': Expect expression.",
                "[line 2] Error at ';': Expect ')' after expression.",
            ]
        );
    }

    #[test]
    fn runtime_error_exit_code_is_70() {
        let (_, outcome) = run("nil();");

        assert_eq!(outcome.map_err(|e| e.exit_code()), Err(70));
    }

    #[test]
    fn separate_sessions_share_nothing_and_agree() {
        let program = r#"
            var total = 0;
            for (var i = 1; i <= 4; i = i + 1) total = total + i;
            print total;
        "#;

        assert_eq!(output_of(program), output_of(program));
        assert_eq!(output_of(program), vec!["10"]);

        let (mut first, _) = session();
        first.run("var only_here = 1;").expect("first session");

        let (mut second, _) = session();
        assert!(matches!(
            second.run("print only_here;"),
            Err(RunError::Runtime(_))
        ));
    }

    #[test]
    fn session_keeps_globals_and_closures_between_runs() {
        let (mut lox, output) = session();

        lox.run("fun make() { var a = 1; fun get() { return a; } return get; }")
            .expect("define make");
        lox.run("var g = make();").expect("call make");
        lox.run("{ var shadow = 2; print g() + shadow; }")
            .expect("use closure");

        assert_eq!(output.lines(), vec!["3"]);
    }

    #[test]
    fn failed_run_leaves_session_usable() {
        let (mut lox, output) = session();

        lox.run("var a = 1;").expect("define a");
        assert!(lox.run("{ var a = 2; nil(); }").is_err());
        assert!(lox.run("print (;").is_err());
        lox.run("print a;").expect("global scope restored");

        assert_eq!(output.lines(), vec!["1"]);
    }

    #[test]
    fn global_redeclaration_reads_the_old_value() {
        assert_eq!(
            output_of("var count = 1; var count = count + 1; print count;"),
            vec!["2"]
        );
    }

    #[test]
    fn session_redeclaration_reads_value_from_an_earlier_run() {
        let (mut lox, output) = session();

        lox.run("var x = 1;").expect("define x");
        lox.run("var x = x + 1; print x;").expect("redefine x from itself");

        assert_eq!(output.lines(), vec!["2"]);
    }

    #[test]
    fn deep_recursion_completes() {
        assert_eq!(
            output_of(
                r#"
                fun depth(n) { if (n == 0) return 0; return depth(n - 1) + 1; }
                print depth(10000);
                "#
            ),
            vec!["10000"]
        );
    }

    #[test]
    fn runaway_recursion_is_a_runtime_error() {
        let (mut lox, output) = session();

        let outcome = lox.run("fun forever(n) { return forever(n + 1); } forever(0);");
        match outcome {
            Err(RunError::Runtime(error)) => assert_eq!(error.message(), "Stack overflow."),
            other => panic!("expected a runtime error, got {:?}", other),
        }

        // The depth counter unwinds with the error.
        lox.run("fun twice(n) { if (n == 0) return 0; return twice(n - 1) + 2; } print twice(100);")
            .expect("session usable after overflow");
        assert_eq!(output.lines(), vec!["200"]);
    }
}
