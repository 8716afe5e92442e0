use chrono::NaiveDate;
use fandom_pulse::scrape::parse_listing;

const LISTING: &str = r#"
<ol class="work index group">
  <li id="work_123" class="work blurb group" role="article">
    <h4 class="heading"><a href="/works/123">Some Title</a></h4>
    <h5 class="fandoms heading">
      <span class="landmark">Fandoms:</span>
      <a class="tag" href="/tags/a/works">Alpha &amp; Omega</a>,
      <a class="tag" href="/tags/b/works">Beta&#39;s World</a>
    </h5>
  </li>
  <li id="work_456" class="work blurb group">
    <h5 class="fandoms heading"><a class="tag" href="/tags/c/works">Gamma</a></h5>
  </li>
  <li id="work_789" class="work blurb group">
    <h4 class="heading">blurb with no fandoms section</h4>
  </li>
</ol>
"#;

fn posted() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
}

#[test]
fn parses_ids_and_fandoms() {
    let works = parse_listing(LISTING, posted()).unwrap();
    assert_eq!(works.len(), 2);

    assert_eq!(works[0].id, 123);
    assert_eq!(
        works[0].fandoms,
        vec!["Alpha & Omega".to_string(), "Beta's World".to_string()]
    );
    assert_eq!(works[0].posted, posted());

    assert_eq!(works[1].id, 456);
    assert_eq!(works[1].fandoms, vec!["Gamma".to_string()]);
}

#[test]
fn blurbs_without_fandoms_are_skipped() {
    let works = parse_listing(LISTING, posted()).unwrap();
    assert!(works.iter().all(|work| work.id != 789));
}

#[test]
fn empty_page_yields_no_works() {
    let works = parse_listing("<html><body></body></html>", posted()).unwrap();
    assert!(works.is_empty());
}

#[test]
fn ignores_non_numeric_ids() {
    let html = r#"<li id="work_abc" class="work"><h5 class="fandoms heading"></h5></li>"#;
    let works = parse_listing(html, posted()).unwrap();
    assert!(works.is_empty());
}
