//! Template rendering for recipe metadata
//!
//! Recipe files are templated before being parsed as YAML. No variables are
//! supplied at resolution time, so rendering reduces to removing template
//! constructs: `{% ... %}` directives, `{{ ... }}` expressions and
//! `{# ... #}` comments all render to nothing.

use regex::Regex;

pub fn render_template(text: &str) -> String {
    let directive_re = Regex::new(r"(?s)\{%.*?%\}").unwrap();
    let expression_re = Regex::new(r"(?s)\{\{.*?\}\}").unwrap();
    let comment_re = Regex::new(r"(?s)\{#.*?#\}").unwrap();

    let rendered = directive_re.replace_all(text, "");
    let rendered = expression_re.replace_all(&rendered, "");
    let rendered = comment_re.replace_all(&rendered, "");
    rendered.into_owned()
}
