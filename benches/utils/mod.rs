use std::str::FromStr;
use tmselect::parsing::Scope;

/// Selectors in the style of a typical color scheme.
pub fn theme_selectors() -> Vec<&'static str> {
    vec![
        "comment",
        "string",
        "string.quoted.double",
        "constant.numeric",
        "keyword.control, keyword.operator",
        "storage.type | storage.modifier",
        "entity.name.function",
        "meta.function-call entity.name.function",
        "source.js meta.tag - string",
        "text.html meta.tag punctuation.definition.tag",
        "L:source.rust meta.attribute",
        "R:meta.block - (comment, string)",
        "^text.html.markdown markup.heading",
        "punctuation.separator.key-value",
        "variable.parameter - meta.function.parameters",
        "support.function.builtin",
    ]
}

/// Scope chains as a highlighter would see them, outermost first.
pub fn scope_chains() -> Vec<Scope> {
    [
        "source.js string.quoted.double.js",
        "text.html.basic source.js.embedded.html meta.tag.js string.unquoted.js",
        "source.rust meta.function.rust meta.block.rust keyword.control.rust",
        "source.rust meta.attribute.rust punctuation.definition.attribute.rust",
        "text.html.markdown markup.heading.1.markdown entity.name.section.markdown",
        "source.python meta.function-call.python support.function.builtin.python",
        "source.json meta.mapping.json punctuation.separator.key-value.json",
        "text.html.basic meta.tag.block.any.html punctuation.definition.tag.begin.html",
    ]
    .iter()
    .map(|chain| Scope::from_str(chain).unwrap_or_default())
    .collect()
}
