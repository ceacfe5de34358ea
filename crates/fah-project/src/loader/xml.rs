//! Minimal element tree built from quick-xml events

use std::collections::BTreeMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{ProjectError, ProjectResult};

/// One XML element with its attributes, text and children
#[derive(Debug, Default)]
pub(crate) struct Element {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> ProjectResult<Self> {
        let mut attributes = BTreeMap::new();
        for attribute in start.attributes() {
            let attribute = attribute?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            attributes.insert(key, value);
        }

        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attributes,
            ..Self::default()
        })
    }

    /// An XML attribute of this element
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// `<attribute name="...">value</attribute>` children as (name, value) pairs
    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.children_named("attribute").filter_map(|child| {
            child
                .attr("name")
                .map(|name| (name, child.text.as_str()))
        })
    }

    /// Value of a named `<attribute>` child; empty values count as absent
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
            .filter(|value| !value.is_empty())
    }
}

/// Parse a document into its root element
pub(crate) fn parse(xml: &str) -> ProjectResult<Element> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Element::from_start(&start)?),
            Event::Empty(start) => {
                let element = Element::from_start(&start)?;
                close(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    close(&mut stack, &mut root, element)?;
                }
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ProjectError::UnexpectedEof {
            element: open.name.clone(),
        });
    }

    root.ok_or_else(|| ProjectError::UnexpectedRoot {
        found: "an empty document".to_string(),
    })
}

/// Attach a finished element to its parent, or make it the root
///
/// A document has exactly one root element.
fn close(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> ProjectResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(ProjectError::UnexpectedRoot {
                found: format!("a second root element <{}>", element.name),
            })
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tree() {
        let root = parse(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<device serialNumber="ABB7F500">
  <attribute name="displayName">Licht &amp; Rollo</attribute>
  <attribute name="floor">01</attribute>
  <attribute name="room"></attribute>
  <channels><channel i="ch0000"/></channels>
</device>"#,
        )
        .unwrap();

        assert_eq!(root.name, "device");
        assert_eq!(root.attr("serialNumber"), Some("ABB7F500"));
        assert_eq!(root.property("displayName"), Some("Licht & Rollo"));
        assert_eq!(root.property("floor"), Some("01"));
        assert_eq!(root.property("room"), None);
        assert_eq!(root.properties().count(), 3);

        let channels: Vec<_> = root.children_named("channels").collect();
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].children[0].attr("i"), Some("ch0000"));
    }

    #[test]
    fn test_cdata_text() {
        let root = parse("<string nameId=\"0001\"><![CDATA[<Licht>]]></string>").unwrap();
        assert_eq!(root.text, "<Licht>");
    }

    #[test]
    fn test_unclosed_element() {
        let err = parse("<project><floorplan>").unwrap_err();
        assert!(matches!(err, ProjectError::UnexpectedEof { ref element } if element == "floorplan"));
    }

    #[test]
    fn test_mismatched_end_tag() {
        assert!(matches!(
            parse("<project></devices>"),
            Err(ProjectError::Xml(_))
        ));
    }

    #[test]
    fn test_second_root_element() {
        let err = parse("<project/><project><strings/></project>").unwrap_err();
        assert!(matches!(
            err,
            ProjectError::UnexpectedRoot { ref found } if found == "a second root element <project>"
        ));
    }

    #[test]
    fn test_empty_document() {
        assert!(matches!(
            parse("   "),
            Err(ProjectError::UnexpectedRoot { .. })
        ));
    }
}
