use regex::Regex;
use std::sync::OnceLock;

/// Statement terminator in effect when a script declares none.
pub const DEFAULT_TERMINATOR: &str = ";";

#[derive(Debug, Clone)]
pub struct SqlStatement {
    pub index: usize,
    pub sql: String,
}

/// Result of splitting one script: the individual statements plus the
/// terminator that was in effect.
#[derive(Debug, Clone)]
pub struct SplitScript {
    pub terminator: String,
    pub statements: Vec<SqlStatement>,
}

// The directive's own arguments are always separated by `;` even when the
// declared terminator differs, so detection and stripping use distinct
// patterns.
fn terminator_directive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)SET\s+TERM\s+(\S+)\s+;").expect("valid pattern"))
}

fn terminator_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?mi)^\s*SET\s+TERM\b.*$").expect("valid pattern"))
}

/// Split raw script text into trimmed, non-empty statements.
///
/// The first `SET TERM <token> ;` directive, if any, declares the terminator
/// for the remainder of the script; every `SET TERM` line is then removed so
/// the directives never appear inside emitted statements. Scripts declare a
/// non-default terminator so procedure bodies, which legally contain `;`
/// internally, are not split mid-body.
pub fn split_script(content: &str) -> SplitScript {
    let content = content.replace("\r\n", "\n");

    let terminator = terminator_directive_re()
        .captures(&content)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| DEFAULT_TERMINATOR.to_string());

    let stripped = terminator_line_re().replace_all(&content, "");

    let statements = stripped
        .split(terminator.as_str())
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .enumerate()
        .map(|(index, sql)| SqlStatement {
            index,
            sql: sql.to_string(),
        })
        .collect();

    SplitScript {
        terminator,
        statements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_default_terminator_splitting() {
        let script = indoc! {r#"
            CREATE DOMAIN D_ID AS INTEGER;

            CREATE DOMAIN D_NAME AS VARCHAR(60);
        "#};
        let split = split_script(script);

        assert_eq!(split.terminator, ";");
        assert_eq!(split.statements.len(), 2);
        assert_eq!(split.statements[0].sql, "CREATE DOMAIN D_ID AS INTEGER");
        assert_eq!(split.statements[0].index, 0);
        assert_eq!(split.statements[1].sql, "CREATE DOMAIN D_NAME AS VARCHAR(60)");
    }

    #[test]
    fn test_declared_terminator_overrides_default() {
        let script = indoc! {r#"
            SET TERM @ ;
            CREATE TABLE A (X INTEGER)@
            CREATE TABLE B (Y INTEGER)@
        "#};
        let split = split_script(script);

        assert_eq!(split.terminator, "@");
        assert_eq!(split.statements.len(), 2);
        assert!(split.statements[0].sql.starts_with("CREATE TABLE A"));
        assert!(split.statements[1].sql.starts_with("CREATE TABLE B"));
    }

    #[test]
    fn test_directive_lines_never_reach_statements() {
        let script = "SET TERM ^ ;\nCREATE TABLE T (X INTEGER)^\nSET TERM ; ^\n";
        let split = split_script(script);

        assert_eq!(split.statements.len(), 1);
        assert!(!split.statements[0].sql.contains("SET TERM"));
    }

    #[test]
    fn test_procedure_body_not_split_mid_body() {
        let script = indoc! {r#"
            SET TERM ^ ;
            CREATE PROCEDURE COUNT_ROWS (TBL VARCHAR(31))
            RETURNS (CNT INTEGER)
            AS
            BEGIN
              CNT = 0;
              SUSPEND;
            END^
            SET TERM ; ^
        "#};
        let split = split_script(script);

        assert_eq!(split.statements.len(), 1);
        let body = &split.statements[0].sql;
        assert!(body.contains("CNT = 0;"));
        assert!(body.contains("SUSPEND;"));
        assert!(body.ends_with("END"));
    }

    #[test]
    fn test_crlf_line_endings_are_normalized() {
        let script = "CREATE TABLE A (X INTEGER);\r\nCREATE TABLE B (Y INTEGER);\r\n";
        let split = split_script(script);

        assert_eq!(split.statements.len(), 2);
        assert!(!split.statements[0].sql.contains('\r'));
    }

    #[test]
    fn test_empty_fragments_are_discarded() {
        let split = split_script(";;  ;\n;");
        assert!(split.statements.is_empty());
    }

    #[test]
    fn test_first_directive_wins() {
        // The switch-back directive at the end must not change the terminator
        let script = "SET TERM @ ;\nCREATE TABLE T (X INTEGER)@\nSET TERM ; @\nCREATE TABLE U (Y INTEGER)@";
        let split = split_script(script);

        assert_eq!(split.terminator, "@");
        assert_eq!(split.statements.len(), 2);
    }
}
