//! End-to-end queries against a sample EPUB package document.

use futures::StreamExt;
use url::Url;
use xmlsift::{
    query_parallel, CancelToken, Error, ParseResult, ParserConfig, PathPattern, TextElement,
    TraversalPosition, XmlQuery,
};

const PACKAGE: &str = include_str!("fixtures/package.opf");

fn fixture_path() -> String {
    format!("{}/tests/fixtures/package.opf", env!("CARGO_MANIFEST_DIR"))
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn languages() -> XmlQuery {
    XmlQuery::from_bytes(PACKAGE)
        .child("package")
        .child("metadata")
        .child("language")
}

#[test]
fn test_all_languages_in_document_order() {
    init_logging();
    let result = languages().elements().unwrap();
    assert_eq!(
        result.elements,
        vec![
            TextElement::new("ja", "/package[1]/metadata[1]/language[1]"),
            TextElement::new("ja2", "/package[1]/metadata[1]/language[2]"),
            TextElement::new("ja3", "/package[1]/metadata[2]/language[1]"),
            TextElement::new("ja4", "/package[1]/metadata[2]/language[2]"),
        ]
    );
}

#[test]
fn test_attributes_along_pattern() {
    let result = languages().elements().unwrap();
    let attrs = &result.attributes;

    assert_eq!(attrs.value("/package[1]", "version"), Some("2.0"));
    assert_eq!(attrs.value("/package[1]", "unique-identifier"), Some("BookID"));
    assert!(attrs.contains("/package[1]/metadata[2]"));
    assert_eq!(attrs.value("/package[1]/metadata[1]/language[2]", "mm"), Some("0"));
    assert!(attrs.get("/package[1]/metadata[1]/language[1]").unwrap().is_empty());

    assert!(!attrs.contains("/package[1]/manifest[1]"));
    assert!(!attrs.contains("/package[1]/metadata[1]/meta[1]"));
}

#[test]
fn test_first_metadata_only() {
    let result = XmlQuery::from_bytes(PACKAGE)
        .child("package")
        .child("metadata")
        .index(0)
        .child("language")
        .elements()
        .unwrap();
    assert_eq!(result.texts(), vec!["ja", "ja2"]);
    assert!(!result.attributes.contains("/package[1]/metadata[2]"));
}

#[test]
fn test_early_termination_matches_full_read() {
    let expressions = [
        "/package/metadata[1]/language",
        "/package/metadata[2]/language[1]",
        "/package/manifest/item[3]",
        "/package/metadata/dc:identifier",
        "/package/spine/itemref[7]",
    ];
    for expr in expressions {
        let pattern: PathPattern = expr.parse().unwrap();
        let early = XmlQuery::from_bytes(PACKAGE)
            .pattern(pattern.clone())
            .elements()
            .unwrap();
        let full = XmlQuery::from_bytes(PACKAGE)
            .pattern(pattern)
            .with_config(ParserConfig::new().with_early_termination(false))
            .elements()
            .unwrap();
        assert_eq!(early, full, "{}", expr);
    }
}

#[test]
fn test_manifest_item_attributes() {
    let result = xmlsift::query(PACKAGE.as_bytes(), "/package/manifest/item[3]").unwrap();
    let item = result.attributes.get("/package[1]/manifest[1]/item[3]").unwrap();
    assert_eq!(item.get("id").map(String::as_str), Some("cover"));
    assert_eq!(item.get("href").map(String::as_str), Some("text/cover.html"));
    assert!(!result.attributes.contains("/package[1]/manifest[1]/item[2]"));

    let selected = result.attributes.select(&"/package/manifest/item".parse().unwrap());
    assert_eq!(selected.len(), 1);
}

#[test]
fn test_prefixed_element_text() {
    let result = xmlsift::query(PACKAGE.as_bytes(), "/package/metadata[1]/dc:contributor").unwrap();
    assert_eq!(result.elements.len(), 1);
    assert!(result.elements[0].text.starts_with("構成・テキスト"));
    assert!(result.elements[0].text.contains('\n'));
}

#[test]
fn test_attribute_keys_are_rendered_positions() {
    let result = XmlQuery::from_bytes(PACKAGE).elements().unwrap();
    assert!(result.elements.is_empty());
    // Empty pattern captures every element
    assert!(result.attributes.contains("/package[1]/spine[1]/itemref[7]"));
    for (key, _) in result.attributes.iter() {
        let position: TraversalPosition = key.parse().unwrap();
        assert!(position.segments().iter().all(|s| s.index >= 1));
        assert_eq!(position.render(), key);
    }
}

#[test]
fn test_results_are_deterministic() {
    let first = languages().elements().unwrap();
    let second = languages().elements().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_malformed_document() {
    let truncated = &PACKAGE[..PACKAGE.find("</metadata>").unwrap()];
    let err = XmlQuery::from_bytes(truncated)
        .child("package")
        .elements()
        .unwrap_err();
    assert!(matches!(err, Error::MalformedDocument { .. }));

    let mismatched = PACKAGE.replacen("</manifest>", "</spine>", 1);
    let err = XmlQuery::from_bytes(mismatched)
        .child("package")
        .elements()
        .unwrap_err();
    assert!(err.is_document_error());
}

#[test]
fn test_utf16_package_matches_utf8() {
    let declared = PACKAGE.replacen("encoding=\"UTF-8\"", "encoding=\"UTF-16\"", 1);
    let mut utf16 = vec![0xFF, 0xFE];
    utf16.extend(declared.encode_utf16().flat_map(u16::to_le_bytes));

    let from_utf16 = XmlQuery::from_bytes(utf16)
        .child("package")
        .child("metadata")
        .child("language")
        .elements()
        .unwrap();
    assert_eq!(from_utf16, languages().elements().unwrap());
}

#[test]
fn test_declared_latin1_document() {
    let doc: &[u8] = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<a lang=\"fran\xE7ais\">caf\xE9</a>";
    let result = xmlsift::query(doc, "/a").unwrap();
    assert_eq!(result.texts(), vec!["café"]);
    assert_eq!(result.attributes.value("/a[1]", "lang"), Some("français"));
}

#[test]
fn test_callback_invoked_once() {
    let mut outcomes: Vec<xmlsift::Result<ParseResult>> = Vec::new();
    languages().get_elements(|outcome| outcomes.push(outcome));
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].as_ref().unwrap().elements.len(), 4);
}

#[test]
fn test_cancelled_callback() {
    let token = CancelToken::new();
    token.cancel();
    let mut outcomes = Vec::new();
    languages().get_elements_with_cancel(&token, |outcome| outcomes.push(outcome));
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(outcomes[0], Err(Error::Cancelled)));
}

#[test]
fn test_file_and_url_sources() {
    let from_path = XmlQuery::from_path(fixture_path())
        .child("package")
        .child("spine")
        .child("itemref")
        .index(6)
        .elements()
        .unwrap();
    assert_eq!(
        from_path.attributes.value("/package[1]/spine[1]/itemref[7]", "idref"),
        Some("okuduke")
    );

    let url = Url::from_file_path(fixture_path()).unwrap();
    let from_url = XmlQuery::from_url(url)
        .child("package")
        .child("spine")
        .child("itemref")
        .index(6)
        .elements()
        .unwrap();
    assert_eq!(from_path, from_url);
}

#[test]
fn test_missing_file() {
    let err = XmlQuery::from_path("/nonexistent/package.opf")
        .child("package")
        .elements()
        .unwrap_err();
    assert!(matches!(err, Error::TokenizerUnavailable(_)));
}

#[test]
fn test_reader_source_small_buffer() {
    let config = ParserConfig::new().with_buffer_capacity(16);
    let result = XmlQuery::from_reader(std::io::Cursor::new(PACKAGE.as_bytes().to_vec()))
        .child("package")
        .child("metadata")
        .child("language")
        .with_config(config)
        .elements()
        .unwrap();
    assert_eq!(result.texts(), vec!["ja", "ja2", "ja3", "ja4"]);
}

#[test]
fn test_parallel_patterns() {
    let patterns: Vec<PathPattern> = [
        "/package/metadata/language",
        "/package/metadata[2]/dc:date",
        "/package/guide",
    ]
    .iter()
    .map(|p| p.parse().unwrap())
    .collect();

    let results = query_parallel(PACKAGE.as_bytes(), &patterns, &ParserConfig::default());
    assert_eq!(results[0].as_ref().unwrap().texts(), vec!["ja", "ja2", "ja3", "ja4"]);
    assert_eq!(results[1].as_ref().unwrap().texts(), vec!["2010-11-30"]);
    assert!(results[2].as_ref().unwrap().elements.is_empty());
}

#[tokio::test]
async fn test_stream_yields_single_result() {
    init_logging();
    let mut stream = languages().elements_stream();
    let result = stream.next().await.unwrap().unwrap();
    assert_eq!(result.texts(), vec!["ja", "ja2", "ja3", "ja4"]);
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_stream_error() {
    let mut stream = XmlQuery::from_bytes("<package><metadata></package>")
        .child("package")
        .elements_stream();
    assert!(matches!(
        stream.next().await,
        Some(Err(Error::MalformedDocument { .. }))
    ));
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_stream_cancelled() {
    let mut stream = languages().elements_stream();
    let token = stream.cancel_token();
    token.cancel();
    assert!(stream.is_cancelled());
    assert!(stream.next().await.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_stream_on_multi_thread_runtime() {
    let results: Vec<_> = XmlQuery::from_bytes(PACKAGE)
        .child("package")
        .child("metadata")
        .index(1)
        .child("language")
        .index(1)
        .elements_stream()
        .collect()
        .await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].as_ref().unwrap().texts(), vec!["ja4"]);
}
