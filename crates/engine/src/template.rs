//! Text templates for the generated document.
//!
//! Every function here is a pure function of its arguments so the exact
//! output format can be tested without touching the filesystem.

use amalgam_core::GuardIdentifier;

/// Heavy separator line: `//` followed by 80 `*`.
pub fn star_rule() -> String {
    format!("//{}", "**".repeat(40))
}

/// Light separator line: `//` followed by 80 `-`.
pub fn dash_rule() -> String {
    format!("//{}", "--".repeat(40))
}

/// Decorative block emitted before each inlined or commented file.
pub fn banner(path: &str, repo: &str) -> String {
    let stars = star_rule();
    let dashes = dash_rule();
    format!("\n\n\n{stars}\n{dashes}\n// {path}\n// {repo}/{path}\n{dashes}\n{stars}\n\n")
}

/// Marker emitted after each inlined file.
pub fn footer(path: &str, repo: &str) -> String {
    format!("\n\n// (end {repo}/{path})\n")
}

/// Preprocessor check asserting that `included` was already inlined.
///
/// Accepts both `GUARD` and `_GUARD` so either naming convention in the
/// upstream header satisfies it.
pub fn guard_check(
    guard: &GuardIdentifier,
    included: &str,
    repo: &str,
    include_root: &str,
) -> String {
    let location = source_location(repo, include_root, included);
    format!(
        "#if !defined({guard}) && !defined(_{guard}) /* {location} */\n\
         #error \"amalgamate: file {included} must have been included at this point\"\n\
         #endif /* {guard} - {location} */\n"
    )
}

fn source_location(repo: &str, include_root: &str, included: &str) -> String {
    if include_root.is_empty() {
        format!("{repo}/{included}")
    } else {
        format!("{repo}/{include_root}/{included}")
    }
}

/// A single line turned into a comment. `line` keeps its own terminator.
pub fn comment_line(line: &str) -> String {
    format!("// {line}")
}

/// Wrap a compiled-source body so only the defining translation unit
/// compiles it.
pub fn definition_block(definition_macro: &str, body: &str) -> String {
    format!("#ifdef {definition_macro}\n{body}\n#endif /* {definition_macro} */\n")
}

/// Top-level include guard around the whole document.
pub fn outer_guard(guard: &str, body: &str) -> String {
    format!("#ifndef {guard}\n#define {guard}\n{body}\n#endif /* {guard} */\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use amalgam_core::derive_guard;

    #[test]
    fn separators_are_82_columns() {
        assert_eq!(star_rule().len(), 82);
        assert_eq!(dash_rule().len(), 82);
        assert!(star_rule()[2..].chars().all(|c| c == '*'));
        assert!(dash_rule()[2..].chars().all(|c| c == '-'));
    }

    #[test]
    fn banner_names_path_and_repo() {
        let b = banner("src/c4/error.hpp", "c4core");
        assert!(b.starts_with("\n\n\n//****"));
        assert!(b.contains("\n// src/c4/error.hpp\n"));
        assert!(b.contains("\n// c4core/src/c4/error.hpp\n"));
        assert!(b.ends_with("****\n\n"));
        assert_eq!(b.lines().filter(|l| *l == star_rule()).count(), 2);
        assert_eq!(b.lines().filter(|l| *l == dash_rule()).count(), 2);
    }

    #[test]
    fn footer_format() {
        assert_eq!(footer("a.h", "lib"), "\n\n// (end lib/a.h)\n");
    }

    #[test]
    fn guard_check_format() {
        let check = guard_check(&derive_guard("c4/error.hpp"), "c4/error.hpp", "c4core", "src");
        assert_eq!(
            check,
            "#if !defined(C4_ERROR_HPP_) && !defined(_C4_ERROR_HPP_) /* c4core/src/c4/error.hpp */\n\
             #error \"amalgamate: file c4/error.hpp must have been included at this point\"\n\
             #endif /* C4_ERROR_HPP_ - c4core/src/c4/error.hpp */\n"
        );
    }

    #[test]
    fn guard_check_without_include_root() {
        let check = guard_check(&derive_guard("a.h"), "a.h", "lib", "");
        assert!(check.contains("/* lib/a.h */"));
    }

    #[test]
    fn definition_block_wraps_body() {
        assert_eq!(
            definition_block("LIB_IMPL", "int x;\n"),
            "#ifdef LIB_IMPL\nint x;\n\n#endif /* LIB_IMPL */\n"
        );
    }

    #[test]
    fn outer_guard_defines_its_macro() {
        let doc = outer_guard("LIB_AMALGAMATED_H_", "body");
        assert_eq!(
            doc,
            "#ifndef LIB_AMALGAMATED_H_\n#define LIB_AMALGAMATED_H_\nbody\n#endif /* LIB_AMALGAMATED_H_ */\n"
        );
    }

    #[test]
    fn comment_line_keeps_terminator() {
        assert_eq!(comment_line("x\n"), "// x\n");
        assert_eq!(comment_line(""), "// ");
    }
}
