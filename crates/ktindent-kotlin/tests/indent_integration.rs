//! End-to-end checks: Kotlin source through the analyzer with the indent rule.

use ktindent_core::{Analyzer, Config, Severity, Violation};
use ktindent_kotlin::KotlinFrontend;
use ktindent_rules::Indentation;
use std::path::Path;

fn analyzer(config: &str) -> Analyzer {
    Analyzer::builder()
        .root(".")
        .frontend(KotlinFrontend::new())
        .rule(Indentation::new())
        .config(Config::parse(config).unwrap())
        .build()
        .unwrap()
}

fn check(config: &str, path: &str, source: &str) -> Vec<Violation> {
    analyzer(config)
        .analyze_source(Path::new(path), source)
        .unwrap()
}

const CONFORMANT: &str = r#"package demo

import kotlin.math.max

class Greeter(private val name: String) {
    private val prefix =
        "Hello"

    fun greet(times: Int): String {
        val count = max(times, 1)
        return if (count > 1) {
            prefix + name
        } else {
            name
        }
    }
}
"#;

#[test]
fn conformant_file_has_no_violations() {
    assert!(check("", "Main.kt", CONFORMANT).is_empty());
}

#[test]
fn conformant_file_stays_clean_on_recheck() {
    let analyzer = analyzer("");
    for _ in 0..2 {
        assert!(analyzer
            .analyze_source(Path::new("Main.kt"), CONFORMANT)
            .unwrap()
            .is_empty());
    }
}

#[test]
fn misindented_block_line_is_reported() {
    let violations = check("", "Main.kt", "fun main() {\n  println()\n}\n");
    assert_eq!(violations.len(), 1);

    let v = &violations[0];
    assert_eq!(v.code, "KI001");
    assert_eq!(v.rule, "indent");
    assert_eq!(v.severity, Severity::Error);
    assert_eq!((v.location.line, v.location.column), (2, 1));
    assert_eq!(v.location.offset, 13);
    assert_eq!(v.location.length, 2);
    insta::assert_snapshot!(v.message, @"Unexpected indentation (2) (it should be 4)");
}

#[test]
fn tab_counts_as_one_column() {
    let violations = check("", "Main.kt", "fun main() {\n\tprintln()\n}\n");
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].message,
        "Unexpected indentation (1) (it should be 4)"
    );
}

#[test]
fn assignment_continuation_uses_continuation_unit() {
    let config = "[properties]\nindent_size = 4\ncontinuation_indent_size = 8\n";

    let ok = "fun f() {\n    val total =\n            first\n}\n";
    assert!(check(config, "Main.kt", ok).is_empty());

    let bad = "fun f() {\n    val total =\n      first\n}\n";
    let violations = check(config, "Main.kt", bad);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].location.line, 3);
    assert_eq!(
        violations[0].message,
        "Unexpected indentation (6) (it should be 8)"
    );
}

#[test]
fn aligned_parameters_are_accepted() {
    let source = "fun f(a: Int,\n      b: Int) {\n}\n";
    assert!(check("", "Main.kt", source).is_empty());
}

#[test]
fn unset_indent_disables_the_rule() {
    let config = "[properties]\nindent_size = \"unset\"\ncontinuation_indent_size = \"unset\"\n";
    let source = "fun main() {\n  println()\n     println()\n}\n";
    assert!(check(config, "Main.kt", source).is_empty());
}

#[test]
fn overrides_apply_per_file() {
    let config = "[[overrides]]\nfiles = [\"*.kts\"]\nproperties = { indent_size = 2 }\n";
    let source = "fun main() {\n  println()\n}\n";
    assert!(check(config, "build.gradle.kts", source).is_empty());
    assert_eq!(check(config, "Main.kt", source).len(), 1);
}

#[test]
fn rule_severity_and_enablement_come_from_config() {
    let source = "fun main() {\n  println()\n}\n";

    let warn = check("[rules.indent]\nseverity = \"warning\"\n", "Main.kt", source);
    assert_eq!(warn[0].severity, Severity::Warning);

    let off = check("[rules.indent]\nenabled = false\n", "Main.kt", source);
    assert!(off.is_empty());
}

#[test]
fn analyze_walks_kotlin_files_and_skips_build_output() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    let build = dir.path().join("build");
    std::fs::create_dir_all(&src).unwrap();
    std::fs::create_dir_all(&build).unwrap();

    std::fs::write(src.join("Good.kt"), CONFORMANT).unwrap();
    std::fs::write(src.join("Bad.kt"), "fun main() {\n   println()\n}\n").unwrap();
    std::fs::write(src.join("notes.txt"), "  not kotlin\n").unwrap();
    std::fs::write(build.join("Gen.kt"), "fun g() {\n g()\n}\n").unwrap();

    let analyzer = Analyzer::builder()
        .root(dir.path())
        .frontend(KotlinFrontend::new())
        .rule(Indentation::new())
        .build()
        .unwrap();
    let result = analyzer.analyze().unwrap();

    assert_eq!(result.files_checked, 2);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].location.file, Path::new("src/Bad.kt"));
    assert!(result.has_errors());
}

#[test]
fn consecutive_misindented_statements_are_each_reported() {
    let source = "class A {\n    fun f() {\n      a()\n      b()\n      c()\n    }\n}\n";
    let violations = check("", "Main.kt", source);

    let lines: Vec<usize> = violations.iter().map(|v| v.location.line).collect();
    assert_eq!(lines, vec![3, 4, 5]);
    assert!(violations
        .iter()
        .all(|v| v.message == "Unexpected indentation (6) (it should be 4)"));
}

const NESTED: &str = r#"class A {
    fun f(): Int {
        val x =
                1
        if (x > 0) {
            return x
        }
        return 0
    }
}
"#;

#[test]
fn nested_blocks_with_distinct_continuation_unit() {
    let config = "[properties]\nindent_size = 4\ncontinuation_indent_size = 8\n";
    assert!(check(config, "Main.kt", NESTED).is_empty());

    let misindented = NESTED
        .replace("            return x", "          return x")
        .replace("                1", "            1");
    let violations = check(config, "Main.kt", &misindented);
    let found: Vec<(usize, &str)> = violations
        .iter()
        .map(|v| (v.location.line, v.message.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            (4, "Unexpected indentation (12) (it should be 8)"),
            (6, "Unexpected indentation (10) (it should be 4)"),
        ]
    );
}

#[test]
fn crlf_line_endings_are_not_indentation() {
    let source = "fun f() {\r\n    a()\r\n\r\n    b()\r\n}\r\n";
    assert!(check("", "Main.kt", source).is_empty());
}

#[test]
fn crlf_misindent_is_located_on_its_line() {
    let source = "fun f() {\r\n    a()\r\n\r\n  b()\r\n}\r\n";
    let violations = check("", "Main.kt", source);
    assert_eq!(violations.len(), 1);

    let v = &violations[0];
    assert_eq!((v.location.line, v.location.column), (4, 1));
    assert_eq!(v.location.offset, 22);
    assert_eq!(v.location.length, 2);
    assert_eq!(v.message, "Unexpected indentation (2) (it should be 4)");
}
