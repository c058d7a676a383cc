use mycomd_convert::{Grammar, convert};

fn round_trip(myco: &str) -> String {
    let markdown = convert(myco, Grammar::Mycomarkup, Grammar::Markdown)
        .expect("pair is registered")
        .text;
    convert(&markdown, Grammar::Markdown, Grammar::Mycomarkup)
        .expect("pair is registered")
        .text
}

#[test]
fn supported_constructs_survive_a_round_trip() {
    for source in [
        "= Heading\n",
        "**bold**\n",
        "//italic//\n",
        "**//bold italic//**\n",
        "~~gone~~\n",
        "`code`\n",
        "```rust\nlet x = 1;\n```\n",
        "----\n",
        "= Title\n\nSome **bold** and //italic// text.\n\n----\n",
    ] {
        assert_eq!(round_trip(source), source, "source: {source:?}");
    }
}

#[test]
fn lists_round_trip() {
    assert_eq!(round_trip("* a\n* b\n"), "* a\n* b\n");
    assert_eq!(round_trip("*. one\n*. two\n"), "*. one\n*. two\n");
    assert_eq!(round_trip("* a\n\t* b\n"), "* a\n\t* b\n");
}

#[test]
fn external_links_round_trip() {
    assert_eq!(
        round_trip("[[https://example.org | Example]]\n"),
        "[[https://example.org | Example]]\n"
    );
}

#[test]
fn markdown_round_trip_of_inline_styles() {
    let markdown = "**bold**\n\n***bold italic***\n";
    let myco = convert(markdown, Grammar::Markdown, Grammar::Mycomarkup).unwrap();
    assert_eq!(myco.text, "**bold**\n\n**//bold italic//**\n");
    let back = convert(&myco.text, Grammar::Mycomarkup, Grammar::Markdown).unwrap();
    assert_eq!(back.text, markdown);
}

#[test]
fn escaped_pipes_stay_inside_table_cells() {
    let myco = convert("| x | y |\n|---|---|\n| a \\| b | c |", Grammar::Markdown, Grammar::Mycomarkup)
        .unwrap()
        .text;
    assert_eq!(myco, "table {\n| x | y\n| a \\| b | c\n}\n");
    let markdown = convert(&myco, Grammar::Mycomarkup, Grammar::Markdown).unwrap().text;
    assert!(markdown.contains("<tr><td>a | b</td><td>c</td></tr>"), "{markdown}");
}
