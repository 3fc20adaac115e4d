//! Every node range must resolve back to the same positions through a
//! locator built over the source, and nest inside its parent's range.

use docast::ast::{AstNode, NodeRef, walk};
use docast::{Format, Locator, Range, parse_as};

const JSON_FIXTURES: &[&str] = &[
    r#"{"a": 1}"#,
    "{\n  \"name\": \"docast\",\n  \"tags\": [\"json\", \"yaml\"],\n  \"nested\": {\"deep\": [1, 2.5, null, true]}\n}",
    r#"{"ключ": "значение", "emoji": "🎉", "list": [{"x": "ü"}]}"#,
    "[\n  {},\n  []\n]",
    "  \"just a string\"  ",
];

const YAML_FIXTURES: &[&str] = &[
    "a: 1",
    "name: docast\ntags:\n  - json\n  - yaml\nnested:\n  deep: [1, 2.5, ~, true]\n",
    "title: \"Quoted: value\"\nsingle: 'it''s'\nempty:\nafter: x\n",
    "script: |\n  line one\n  line two\nnext: folded\n",
    "ключ: значение\nемодзи: 🎉\n",
    "- a\n- b:\n    c: d\n-\n  - nested\n",
    "flow: {x: 1, y: [2, 3]}\n",
    "заметка: |\n  первая строка с ü и 🎉\n  вторая\nдальше: ok\n",
    "outer:\n  inner: >-\n    ééééééééééééééééééééééééééééééé\n    ààà\n  after: 1\n",
    "a:\n  b: 1\n  # trailing comment\nc: 2 # inline\n",
    "- \n- b\n-\n",
];

fn check_position(locator: &Locator, range: &Range, node: NodeRef<'_>) {
    assert!(
        range.start <= range.end,
        "{} range ends before it starts: {:?}",
        node.node_type(),
        range
    );
    for pos in [range.start, range.end] {
        assert_eq!(
            locator.position(pos.offset),
            Ok(pos),
            "{} position does not round-trip",
            node.node_type()
        );
    }
}

fn contains(outer: &Range, inner: &Range) -> bool {
    outer.start.offset <= inner.start.offset && inner.end.offset <= outer.end.offset
}

fn check_tree(format: Format, text: &str) {
    let root = parse_as(format, 0, text)
        .unwrap_or_else(|err| panic!("failed to parse {:?}: {}", text, err));
    let locator = Locator::new(text);

    walk(root.as_node(), &mut |node| {
        check_position(&locator, node.range(), node);

        match node {
            NodeRef::Object(object) => {
                for prop in object.children() {
                    assert!(contains(object.loc(), prop.loc()), "{:?}", text);
                }
            }
            NodeRef::Array(array) => {
                for child in array.children() {
                    assert!(contains(array.loc(), child.loc()), "{:?}", text);
                }
            }
            NodeRef::Property(prop) => {
                assert_eq!(prop.loc().start, prop.key().loc().start);
                assert_eq!(prop.loc().end, prop.value().loc().end);
                assert!(prop.key().loc().end.offset <= prop.value().loc().start.offset);
            }
            NodeRef::Literal(_) | NodeRef::Identifier(_) => {}
        }
    });
}

#[test]
fn test_json_ranges_round_trip() {
    for text in JSON_FIXTURES {
        check_tree(Format::Json, text);
    }
}

#[test]
fn test_yaml_ranges_round_trip() {
    for text in YAML_FIXTURES {
        check_tree(Format::Yaml, text);
    }
}

#[test]
fn test_source_slices_match_values() {
    let text = "{\"город\": \"Москва\", \"n\": 42}";
    let root = parse_as(Format::Json, 0, text).unwrap();
    let chars: Vec<char> = text.chars().collect();
    let slice = |range: &Range| -> String {
        chars[range.start.offset..range.end.offset].iter().collect()
    };

    let object = root.as_object().unwrap();
    let city = object.get("город").unwrap();
    assert_eq!(slice(city.key().loc()), "\"город\"");
    assert_eq!(slice(city.value().loc()), "\"Москва\"");
    assert_eq!(slice(object.get("n").unwrap().value().loc()), "42");
}

#[test]
fn test_yaml_source_slices_match_values() {
    let text = "город: Москва\nquoted: \"a b\"\n";
    let root = parse_as(Format::Yaml, 0, text).unwrap();
    let chars: Vec<char> = text.chars().collect();
    let slice = |range: &Range| -> String {
        chars[range.start.offset..range.end.offset].iter().collect()
    };

    let object = root.as_object().unwrap();
    let city = object.get("город").unwrap();
    assert_eq!(slice(city.key().loc()), "город");
    assert_eq!(slice(city.value().loc()), "Москва");
    assert_eq!(slice(object.get("quoted").unwrap().value().loc()), "\"a b\"");
}

#[test]
fn test_block_scalar_slice_spans_header_and_content() {
    let text = "заметка: |\n  первая ü\n  вторая\nдальше: ok\n";
    let root = parse_as(Format::Yaml, 0, text).unwrap();
    let chars: Vec<char> = text.chars().collect();

    let object = root.as_object().unwrap();
    let note = object.get("заметка").unwrap().value();
    let slice: String = chars[note.loc().start.offset..note.loc().end.offset]
        .iter()
        .collect();
    assert_eq!(slice, "|\n  первая ü\n  вторая");

    let next = object.get("дальше").unwrap();
    assert_eq!(next.key().loc().start.line, 4);
    assert_eq!(next.key().loc().start.column, 1);
    assert_eq!(object.loc().end.offset, text.chars().count() - 1);
}
