//! WordprocessingML lookup helpers.

pub const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// First WML child of `node` named `name`.
pub fn wml<'a>(node: roxmltree::Node<'a, 'a>, name: &str) -> Option<roxmltree::Node<'a, 'a>> {
    node.children()
        .find(|n| n.tag_name().name() == name && n.tag_name().namespace() == Some(WML_NS))
}

/// `w:val` of the WML child named `child`.
pub fn wml_attr<'a>(node: roxmltree::Node<'a, 'a>, child: &str) -> Option<&'a str> {
    wml(node, child).and_then(|n| n.attribute((WML_NS, "val")))
}

/// A WML toggle property (`w:b`, `w:i`): present with no `w:val`, or with a
/// value other than "0"/"false", means on.
pub fn wml_bool(parent: roxmltree::Node, name: &str) -> bool {
    wml(parent, name).is_some_and(|n| {
        n.attribute((WML_NS, "val"))
            .is_none_or(|v| v != "0" && v != "false")
    })
}

/// Underline is on unless absent or explicitly `none`.
pub fn wml_underline(rpr: roxmltree::Node) -> bool {
    wml(rpr, "u").is_some_and(|n| {
        n.attribute((WML_NS, "val"))
            .is_none_or(|v| v != "none" && v != "0" && v != "false")
    })
}

pub fn is_wml(node: roxmltree::Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(WML_NS)
}

/// Local name of a WML element; `None` for text and foreign elements.
pub fn wml_name<'a>(node: roxmltree::Node<'a, 'a>) -> Option<&'a str> {
    (node.is_element() && node.tag_name().namespace() == Some(WML_NS))
        .then(|| node.tag_name().name())
}
