//! Quote-aware field splitting
//!
//! A data line is cut on every comma first. A field wrapped in double
//! quotes may itself contain commas, so its pieces arrive as several tokens.
//! [`FieldSplitter`] reassembles them with a two-state machine:
//!
//! ```text
//!            token opens a quote, does not close it
//!   Outside ---------------------------------------> InsideQuote
//!      ^                                                 |
//!      +------------- token ends with a quote -----------+
//! ```
//!
//! While inside a quote, tokens are re-joined with the comma they were cut
//! on. Surrounding quotes are stripped from finished fields, doubled quotes
//! are unescaped and whitespace is trimmed.

#[derive(Debug, Default)]
enum SplitState {
    #[default]
    Outside,
    InsideQuote(String),
}

/// Token-by-token field assembler
#[derive(Debug, Default)]
pub struct FieldSplitter {
    state: SplitState,
    fields: Vec<String>,
}

impl FieldSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the next comma-separated token
    pub fn feed(&mut self, token: &str) {
        self.state = match std::mem::take(&mut self.state) {
            SplitState::Outside if opens_quote(token) => SplitState::InsideQuote(token.to_string()),
            SplitState::Outside => {
                self.fields.push(clean(token));
                SplitState::Outside
            }
            SplitState::InsideQuote(mut partial) => {
                partial.push(',');
                partial.push_str(token);
                if closes_quote(token) {
                    self.fields.push(clean(&partial));
                    SplitState::Outside
                } else {
                    SplitState::InsideQuote(partial)
                }
            }
        };
    }

    /// Whether a quoted field is still waiting for its closing token
    pub fn is_inside_quote(&self) -> bool {
        matches!(self.state, SplitState::InsideQuote(_))
    }

    /// Finish the line; an unterminated quoted field is kept as it stands
    pub fn finish(mut self) -> Vec<String> {
        if let SplitState::InsideQuote(partial) = std::mem::take(&mut self.state) {
            tracing::debug!(field = %partial, "unterminated quoted field");
            self.fields.push(clean(&partial));
        }
        self.fields
    }
}

/// Split one line into its fields
///
/// ```
/// use effects_index::io::split_fields;
///
/// let fields = split_fields(r#"Exports,2015,"Milk powder, butter, and cheese",$"#);
/// assert_eq!(fields, vec!["Exports", "2015", "Milk powder, butter, and cheese", "$"]);
/// ```
pub fn split_fields(line: &str) -> Vec<String> {
    let mut splitter = FieldSplitter::new();
    for token in line.split(',') {
        splitter.feed(token);
    }
    splitter.finish()
}

fn opens_quote(token: &str) -> bool {
    let token = token.trim();
    token.starts_with('"') && !(token.len() > 1 && token.ends_with('"'))
}

fn closes_quote(token: &str) -> bool {
    token.trim_end().ends_with('"')
}

fn clean(field: &str) -> String {
    let field = field.trim();
    let unquoted = field
        .strip_prefix('"')
        .map(|rest| rest.strip_suffix('"').unwrap_or(rest))
        .unwrap_or(field);
    unquoted.replace("\"\"", "\"").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("a,b,c", &["a", "b", "c"])]
    #[case::trims(" a , b ,c ", &["a", "b", "c"])]
    #[case::empty_fields("a,,c,", &["a", "", "c", ""])]
    #[case::quoted_no_comma(r#""a",b"#, &["a", "b"])]
    #[case::quoted_one_comma(r#"x,"a, b",c"#, &["x", "a, b", "c"])]
    #[case::quoted_many_commas(r#""a,b,c,d",e"#, &["a,b,c,d", "e"])]
    #[case::quoted_last(r#"x,"y, z""#, &["x", "y, z"])]
    #[case::two_quoted(r#""a,b","c,d""#, &["a,b", "c,d"])]
    #[case::escaped_quote(r#""say ""hi""",x"#, &[r#"say "hi""#, "x"])]
    #[case::unterminated(r#"x,"a, b"#, &["x", "a, b"])]
    #[case::lone_quote_token(r#"",a,""#, &[",a,"])]
    fn test_split_fields(#[case] line: &str, #[case] expected: &[&str]) {
        assert_eq!(split_fields(line), expected);
    }

    #[test]
    fn test_state_transitions() {
        let mut splitter = FieldSplitter::new();
        splitter.feed("Exports");
        assert!(!splitter.is_inside_quote());
        splitter.feed("\"Milk powder");
        assert!(splitter.is_inside_quote());
        splitter.feed(" butter");
        assert!(splitter.is_inside_quote());
        splitter.feed(" and cheese\"");
        assert!(!splitter.is_inside_quote());
        assert_eq!(
            splitter.finish(),
            vec!["Exports", "Milk powder, butter, and cheese"]
        );
    }

    #[test]
    fn test_dataset_row() {
        let line = r#"Exports,2015,01/01/2015,Thursday,All,"Milk powder, butter, and cheese",All,$,116000000,116000000"#;
        let fields = split_fields(line);
        assert_eq!(fields.len(), 10);
        assert_eq!(fields[5], "Milk powder, butter, and cheese");
        assert_eq!(fields[9], "116000000");
    }
}
