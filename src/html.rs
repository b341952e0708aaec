use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::Html;

/// Elements that never take a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
    "param", "source", "track", "wbr",
];

/// Serializes the parsed document with one-space-per-depth indentation, each
/// tag and trimmed text run on its own line. Output is a pure function of
/// the tree, so writing the same snapshot twice produces identical bytes.
pub fn prettify(document: &Html) -> String {
    let mut out = String::new();
    for child in document.tree.root().children() {
        write_node(child, 0, &mut out);
    }
    out
}

fn write_node(node: NodeRef<'_, Node>, depth: usize, out: &mut String) {
    let pad = " ".repeat(depth);
    match node.value() {
        Node::Doctype(doctype) => {
            out.push_str(&pad);
            out.push_str("<!DOCTYPE ");
            out.push_str(doctype.name());
            out.push_str(">\n");
        }
        Node::Comment(comment) => {
            let text: &str = comment;
            out.push_str(&pad);
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->\n");
        }
        Node::Text(text) => {
            let content: &str = text;
            for line in content.lines() {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    out.push_str(&pad);
                    out.push_str(&escape_text(trimmed));
                    out.push('\n');
                }
            }
        }
        Node::Element(element) => {
            out.push_str(&pad);
            out.push('<');
            out.push_str(element.name());
            // Attribute maps do not promise iteration order; sorting keeps
            // the serialized bytes identical across runs.
            let mut attrs: Vec<(&str, &str)> = element.attrs().collect();
            attrs.sort_unstable();
            for (name, value) in attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
            out.push_str(">\n");
            if !VOID_ELEMENTS.contains(&element.name()) {
                for child in node.children() {
                    write_node(child, depth + 1, out);
                }
                out.push_str(&pad);
                out.push_str("</");
                out.push_str(element.name());
                out.push_str(">\n");
            }
        }
        _ => {}
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"<!DOCTYPE html>
<html><head><title>t</title></head><body>
<div class="wrap" id="main">  Hello  <img src="a.png"><!-- note --></div>
</body></html>"#;

    #[test]
    fn test_prettify_indents_and_keeps_structure() {
        let document = Html::parse_document(FIXTURE);
        let pretty = prettify(&document);

        assert!(pretty.starts_with("<!DOCTYPE html>\n"));
        assert!(pretty.contains("<html>\n"));
        assert!(pretty.contains("<div class=\"wrap\" id=\"main\">\n"));
        assert!(pretty.contains("Hello\n"));
        assert!(pretty.contains("<!-- note -->\n"));
        assert!(pretty.contains("</div>\n"));
        // Void element, no closing tag.
        assert!(pretty.contains("<img src=\"a.png\">\n"));
        assert!(!pretty.contains("</img>"));
    }

    #[test]
    fn test_prettify_is_deterministic() {
        let document = Html::parse_document(FIXTURE);
        let first = prettify(&document);
        let second = prettify(&document);
        assert_eq!(first, second);

        // Re-parsing the same input also yields identical output.
        let reparsed = Html::parse_document(FIXTURE);
        assert_eq!(first, prettify(&reparsed));
    }

    #[test]
    fn test_prettify_escapes_text_and_attributes() {
        let document = Html::parse_document(
            r#"<html><body><p title="a&quot;b">1 &lt; 2</p></body></html>"#,
        );
        let pretty = prettify(&document);
        assert!(pretty.contains("title=\"a&quot;b\""));
        assert!(pretty.contains("1 &lt; 2"));
    }
}
