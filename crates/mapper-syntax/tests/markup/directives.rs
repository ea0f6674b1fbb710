//! Directive tag classification

use mapper_syntax::{Branch, Choose, MarkupError, Node, parse};

fn body(input: &str) -> Vec<Node> {
    let doc = parse(input).unwrap();
    doc.statements()[0].body.clone()
}

#[test]
fn test_parse_if() {
    let nodes = body(r#"<sql id="a"><if test="age > 10">AND age > 10</if></sql>"#);

    assert_eq!(
        nodes,
        vec![Node::If {
            test: "age > 10".into(),
            children: vec![Node::text("AND age > 10")],
        }]
    );
}

#[test]
fn test_parse_choose() {
    let nodes = body(
        r#"<sql id="a"><choose>
            <when test="kind == 'a'">A</when>
            <when test="kind == 'b'">B</when>
            <otherwise>C</otherwise>
        </choose></sql>"#,
    );

    assert_eq!(
        nodes,
        vec![Node::Choose(Choose {
            whens: vec![
                Branch {
                    test: "kind == 'a'".into(),
                    children: vec![Node::text("A")],
                },
                Branch {
                    test: "kind == 'b'".into(),
                    children: vec![Node::text("B")],
                },
            ],
            otherwise: vec![Node::text("C")],
        })]
    );
}

#[test]
fn test_parse_isnotnull_include_where() {
    let nodes = body(
        r#"<sql id="a"><include refid="cols"/><where><isnotnull property="name">AND name = @name</isnotnull></where></sql>"#,
    );

    assert_eq!(
        nodes,
        vec![
            Node::Include {
                refid: "cols".into()
            },
            Node::Where {
                children: vec![Node::IsNotNull {
                    property: "name".into(),
                    children: vec![Node::text("AND name = @name")],
                }],
            },
        ]
    );
}

#[test]
fn test_tag_names_ignore_case() {
    let nodes = body(r#"<sql id="a"><IsNotNull property="x">y</IsNotNull></sql>"#);

    assert!(matches!(nodes[0], Node::IsNotNull { .. }));
}

/// Error carried by the first node of statement `a`.
fn invalid(input: &str) -> MarkupError {
    match body(input).remove(0) {
        Node::Invalid { error, .. } => error,
        other => panic!("expected an invalid directive, got {other:?}"),
    }
}

#[test]
fn test_include_requires_refid() {
    let err = invalid(r#"<sql id="a"><include/></sql>"#);

    assert_eq!(
        err,
        MarkupError::MissingAttribute {
            tag: "include".into(),
            attribute: "refid".into(),
        }
    );
}

#[test]
fn test_choose_rejects_a_second_otherwise() {
    let err = invalid(
        r#"<sql id="a"><choose><when test="a == 1">x</when><otherwise>y</otherwise><otherwise>z</otherwise></choose></sql>"#,
    );

    assert_eq!(
        err,
        MarkupError::InvalidChoose("more than one <otherwise>".into())
    );
}

#[test]
fn test_choose_rejects_loose_content() {
    let err = invalid(
        r#"<sql id="a"><choose>oops<when test="a == 1">x</when><otherwise>y</otherwise></choose></sql>"#,
    );

    assert!(matches!(err, MarkupError::InvalidChoose(_)));
}

#[test]
fn test_choose_requires_a_when() {
    let err = invalid(r#"<sql id="a"><choose><otherwise>y</otherwise></choose></sql>"#);

    assert_eq!(
        err,
        MarkupError::InvalidChoose("at least one <when> is required".into())
    );
}

#[test]
fn test_nested_invalid_directive_stays_local() {
    let nodes = body(r#"<sql id="a">x <where><isnotnull>y</isnotnull></where></sql>"#);

    match &nodes[1] {
        Node::Where { children } => assert!(matches!(
            &children[0],
            Node::Invalid { tag, error: MarkupError::MissingAttribute { .. } } if tag == "isnotnull"
        )),
        other => panic!("unexpected node: {other:?}"),
    }
}
