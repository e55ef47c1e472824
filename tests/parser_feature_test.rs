use pretty_assertions::assert_eq;
use wprich::converter::decode_entities;
use wprich::{render, Block, Degradation, InlineNode, RenderOptions, RichTextRenderer};

fn text(s: &str) -> InlineNode {
    InlineNode::Text(s.to_string())
}

#[test]
fn test_heading() {
    assert_eq!(
        render("<h2>Title</h2>").blocks,
        vec![Block::Heading {
            level: 2,
            inline: vec![text("Title")]
        }]
    );
}

#[test]
fn test_paragraph_with_bold() {
    assert_eq!(
        render("<p>Hello <b>World</b>!</p>").blocks,
        vec![Block::Paragraph {
            inline: vec![text("Hello "), InlineNode::Bold("World".into()), text("!")]
        }]
    );
}

#[test]
fn test_unordered_list() {
    assert_eq!(
        render("<ul><li>One</li><li>Two</li></ul>").blocks,
        vec![Block::List {
            ordered: false,
            items: vec![vec![text("One")], vec![text("Two")]]
        }]
    );
}

#[test]
fn test_orphan_list_item_contributes_nothing() {
    assert!(render("<li>lonely</li>").is_empty());
}

#[test]
fn test_line_break_in_paragraph() {
    assert_eq!(
        render("<p>Line one<br>Line two</p>").blocks,
        vec![Block::Paragraph {
            inline: vec![text("Line one"), InlineNode::LineBreak, text("Line two")]
        }]
    );
}

#[test]
fn test_malformed_numeric_entity_passes_through() {
    assert_eq!(
        render("<p>&#zzz;</p>").blocks,
        vec![Block::Paragraph {
            inline: vec![text("&#zzz;")]
        }]
    );
}

#[test]
fn test_no_block_tags_is_one_paragraph() {
    for input in [
        "plain words",
        "Caf&eacute; &amp; bar &#8212; done",
        "with <span>unsupported</span> and <b>bold</b> tags",
        "1 < 2 > 0",
    ] {
        let doc = render(input);
        assert_eq!(doc.blocks.len(), 1, "input: {input}");
        let Block::Paragraph { inline } = &doc.blocks[0] else {
            panic!("expected paragraph for {input}");
        };
        let rebuilt: String = inline.iter().map(InlineNode::text).collect();
        let expected = wprich::converter::strip_tags(&decode_entities(input));
        assert_eq!(rebuilt, expected.trim());
    }
}

#[test]
fn test_blank_run_between_inline_tags_is_dropped() {
    assert_eq!(
        render("<b>a</b> <i>b</i>").blocks,
        vec![Block::Paragraph {
            inline: vec![InlineNode::Bold("a".into()), InlineNode::Italic("b".into())]
        }]
    );
}

#[test]
fn test_whitespace_only_unsupported_markup_renders_nothing() {
    assert!(render("<p><span> </span></p>").is_empty());
}

#[test]
fn test_numeric_entities_decode_to_code_points() {
    for code in [65u32, 233, 8217, 0x1F4F0] {
        let input = format!("&#{};", code);
        let expected = char::from_u32(code).expect("valid code point").to_string();
        assert_eq!(decode_entities(&input), expected);
    }
    for invalid in ["&#55296;", "&#1114112;", "&#xFFFFFFFFF;"] {
        assert_eq!(decode_entities(invalid), invalid);
        assert_eq!(decode_entities(&decode_entities(invalid)), invalid);
    }
}

#[test]
fn test_double_decoding_of_escaped_amp() {
    let once = decode_entities("&amp;amp;").into_owned();
    assert_eq!(once, "&amp;");
    assert_eq!(decode_entities(&once), "&");
}

#[test]
fn test_mixed_article() {
    let html = r#"<h3>Update</h3>
<p>Read <a href="https://news.example/a?x=1&amp;y=2">the story</a> or run <code>cargo</code>.</p>
<ol><li><em>first</em></li><li>second <u>point</u></li></ol>"#;
    assert_eq!(
        render(html).blocks,
        vec![
            Block::Heading {
                level: 3,
                inline: vec![text("Update")]
            },
            Block::Paragraph {
                inline: vec![
                    text("Read "),
                    InlineNode::Link {
                        text: "the story".into(),
                        href: "https://news.example/a?x=1&y=2".into()
                    },
                    text(" or run "),
                    InlineNode::Code("cargo".into()),
                    text("."),
                ]
            },
            Block::List {
                ordered: true,
                items: vec![
                    vec![InlineNode::Italic("first".into())],
                    vec![text("second "), InlineNode::Underline("point".into())],
                ]
            },
        ]
    );
}

#[test]
fn test_report_lists_degradations_in_order() {
    let outcome = RichTextRenderer::with_defaults()
        .render_with_report("<p><img src=\"x.png\">caption <b>open</p><li>x</li></div>");
    assert_eq!(
        outcome.degradations,
        vec![
            Degradation::UnsupportedTag("img".into()),
            Degradation::UnmatchedInlineTag("b".into()),
            Degradation::OrphanListItem,
            Degradation::StrayClosingTag("div".into()),
        ]
    );
    assert_eq!(
        outcome.document.blocks,
        vec![Block::Paragraph {
            inline: vec![text("caption open")]
        }]
    );
}

#[test]
fn test_preserve_whitespace_option() {
    let renderer = RichTextRenderer::new(RenderOptions {
        preserve_whitespace: true,
        ..Default::default()
    });
    assert_eq!(
        renderer.render("<p>  padded  </p>").blocks,
        vec![Block::Paragraph {
            inline: vec![text("  padded  ")]
        }]
    );
    assert_eq!(
        render("<p>  padded  </p>").blocks,
        vec![Block::Paragraph {
            inline: vec![text("padded")]
        }]
    );
}

#[test]
fn test_renderer_is_shareable_across_threads() {
    let renderer = std::sync::Arc::new(RichTextRenderer::with_defaults());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let renderer = std::sync::Arc::clone(&renderer);
            std::thread::spawn(move || renderer.render(&format!("<h{0}>T{0}</h{0}>", i + 1)))
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let doc = handle.join().expect("thread panicked");
        assert_eq!(
            doc.blocks,
            vec![Block::Heading {
                level: i as u8 + 1,
                inline: vec![text(&format!("T{}", i + 1))]
            }]
        );
    }
}
