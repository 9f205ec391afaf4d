use article_gravity::{
    dom, find_best_among, find_best_element, score_element, PatternKind, PatternSet, WeightTable,
};

fn words(n: usize) -> String {
    "word ".repeat(n).trim_end().to_string()
}

#[test]
fn plain_element_scores_a_tenth_of_its_text() {
    for (len, expected) in [(0, 0), (7, 1), (12, 1), (43, 4), (67, 7), (99, 10)] {
        let html = format!("<body><p>{}</p><div>{}</div></body>", "x".repeat(len), "y".repeat(len));
        let doc = dom::parse(&html);
        let patterns = PatternSet::default();
        let mut weights = WeightTable::new();

        for sel in ["p", "div"] {
            let node = doc.select(sel).nodes()[0];
            assert_eq!(
                score_element(&node, &mut weights, &patterns),
                expected,
                "{sel} with {len} chars"
            );
        }
    }
}

#[test]
fn rescoring_returns_the_same_weight() {
    let html = format!(
        r#"<div class="post"><p>{}</p><p>{}</p><h2>{}</h2><div><p>{}</p></div></div>"#,
        words(12),
        words(14),
        words(5),
        words(30)
    );
    let doc = dom::parse(&html);
    let root = doc.select("div.post").nodes()[0];
    let patterns = PatternSet::default();
    let mut weights = WeightTable::new();

    let first = score_element(&root, &mut weights, &patterns);
    let second = score_element(&root, &mut weights, &patterns);
    assert_eq!(first, second);
}

#[test]
fn scoring_persists_deltas_onto_children() {
    let html = format!(
        r#"<div id="root"><p>{p}</p><p>{p}</p><h2>{h}</h2><li>x</li></div>"#,
        p = words(12),
        h = words(5)
    );
    let doc = dom::parse(&html);
    let root = doc.select("#root").nodes()[0];
    let ps = doc.select("p").nodes().to_vec();
    let h2 = doc.select("h2").nodes()[0];
    let li = doc.select("li").nodes()[0];
    let mut weights = WeightTable::new();

    // two real paragraphs of 59 chars (2 each), an h2 (30), heading bonus (20)
    assert_eq!(score_element(&root, &mut weights, &PatternSet::default()), 54);

    // round(59 / 35) + the sibling bonus for paragraphs
    assert_eq!(weights.get(ps[0].id), 32);
    assert_eq!(weights.get(ps[1].id), 32);
    assert_eq!(weights.get(li.id), -30);
    assert!(!weights.contains(h2.id));
    assert!(!weights.contains(root.id));
}

#[test]
fn negative_child_is_not_descended_into() {
    let html = format!(
        r#"<div><div class="sidebar"><p>{p}</p></div><div><p>{p}</p></div></div>"#,
        p = words(12)
    );
    let doc = dom::parse(&html);
    let outer = doc.select("div").nodes()[0];
    let ps = doc.select("p").nodes().to_vec();
    let mut weights = WeightTable::new();

    // (-30 + 2) / 3, truncated
    assert_eq!(score_element(&outer, &mut weights, &PatternSet::default()), -9);
    assert!(!weights.contains(ps[0].id));
    assert_eq!(weights.get(ps[1].id), 2);
}

#[test]
fn custom_patterns_change_classification() {
    let doc = dom::parse(r#"<div class="lede">x</div>"#);
    let div = doc.select("div").nodes()[0];
    let mut weights = WeightTable::new();

    assert_eq!(score_element(&div, &mut weights, &PatternSet::default()), 0);

    let patterns = match PatternSet::default().with_pattern(PatternKind::Positive, "lede") {
        Ok(patterns) => patterns,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };
    assert_eq!(score_element(&div, &mut weights, &patterns), 35);
}

#[test]
fn finder_prefers_positive_container_over_paragraphs() {
    let html = r#"
        <html><body>
          <div class="sidebar"><p>Related links</p></div>
          <div class="article-body">
            <p>First paragraph with plenty of words to count as a real paragraph of text.</p>
            <p>Second paragraph, which is also long enough to count as a real paragraph.</p>
          </div>
        </body></html>
    "#;
    let doc = dom::parse(html);
    let mut weights = WeightTable::new();

    match find_best_element(&doc, &mut weights, &PatternSet::default()) {
        Some(best) => assert_eq!(dom::class_name(&best), "article-body"),
        None => panic!("expected a best element"),
    }

    // Seeds halve per candidate: sidebar, its p, the article body, ...
    let sidebar = doc.select("div.sidebar").nodes()[0];
    assert!(weights.get(sidebar.id) >= 100);
}

#[test]
fn generic_mode_picks_among_supplied_nodes() {
    let doc = dom::parse(
        r#"<body><span class="author">Jo</span><span class="author article">Jane Doe, science desk</span></body>"#,
    );
    let spans = doc.select("span").nodes().to_vec();
    let mut weights = WeightTable::new();

    let best = find_best_among(spans.clone(), &mut weights, &PatternSet::default());
    assert_eq!(best.map(|n| n.id), Some(spans[1].id));
}
