//! Whole-document parsing

use mapper_syntax::{MarkupError, Node, parse};

#[test]
fn test_parse_user_mapper() {
    let input = r#"<?xml version="1.0" encoding="UTF-8"?>
        <!-- user queries -->
        <mapper>
            <select id="findAll">
                SELECT * FROM users
                <where>
                    <if test="name == 'Jane'">AND name = 'Jane'</if>
                </where>
            </select>
            <select id="getOne">SELECT * FROM users WHERE id = @id</select>
            <insert id="insert">INSERT INTO users (name) VALUES (@name)</insert>
        </mapper>
    "#;

    let result = parse(input);
    assert!(result.is_ok(), "Failed to parse: {:?}", result.err());

    let doc = result.unwrap();
    assert_eq!(doc.len(), 3);
    assert_eq!(
        doc.ids().collect::<Vec<_>>(),
        vec!["findAll", "getOne", "insert"]
    );
    assert_eq!(doc.statement("insert").unwrap().kind, "insert");
    assert!(doc.statement("missing").is_none());
}

#[test]
fn test_multiple_top_level_statements() {
    let doc = parse(r#"<sql id="a">A</sql><sql id="b">B</sql>"#).unwrap();

    assert_eq!(doc.len(), 2);
    assert_eq!(doc.statement("b").unwrap().body, vec![Node::text("B")]);
}

#[test]
fn test_whitespace_in_text_is_preserved() {
    let doc = parse("<sql id=\"a\">SELECT\n   1</sql>").unwrap();

    assert_eq!(doc.statement("a").unwrap().body, vec![Node::text("SELECT\n   1")]);
}

#[test]
fn test_empty_document_has_no_statements() {
    let doc = parse("").unwrap();

    assert!(doc.is_empty());
}

#[test]
fn test_broken_markup_is_a_syntax_error() {
    let err = parse(r#"<select id="a"><if test="x == 1"></select>"#).unwrap_err();

    assert!(matches!(err, MarkupError::Syntax { .. }), "{err:?}");
}

#[test]
fn test_unsupported_tags_are_listed_eagerly() {
    let doc = parse(
        r#"<mapper>
            <select id="a"><if test="x == 1"><foreach/></if></select>
            <select id="b"><bind/></select>
        </mapper>"#,
    )
    .unwrap();

    let found: Vec<_> = doc
        .unsupported_tags()
        .into_iter()
        .map(|t| (t.statement, t.tag))
        .collect();

    assert_eq!(
        found,
        vec![
            ("a".to_string(), "foreach".to_string()),
            ("b".to_string(), "bind".to_string()),
        ]
    );
}

#[test]
fn test_invalid_directives_are_listed_eagerly() {
    let doc = parse(
        r#"<mapper>
            <select id="ok">SELECT 1</select>
            <select id="bad"><choose><when test="a == 1">x</when></choose></select>
        </mapper>"#,
    )
    .unwrap();

    let found = doc.invalid_directives();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].statement, "bad");
    assert_eq!(found[0].tag, "choose");
    assert!(matches!(found[0].error, MarkupError::InvalidChoose(_)));

    let json = serde_json::to_value(&found).unwrap();
    assert_eq!(
        json[0]["error"],
        "Invalid <choose> block: exactly one <otherwise> is required"
    );
}

#[test]
fn test_document_serializes_to_json() {
    let doc = parse(r#"<sql id="a"><include refid="b"/></sql>"#).unwrap();

    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["statements"][0]["id"], "a");
    assert_eq!(json["statements"][0]["body"][0]["include"]["refid"], "b");
}
