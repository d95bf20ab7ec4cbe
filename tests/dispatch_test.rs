use shieldscrape::{extract, extract_bytes, Document, ExtractionStatus, ParserKind};

#[test]
fn binary_input_fails_with_empty_document() {
    let bytes = b"GIF89a\x01\x00\x01\x00\x80\x00\x00\x00\x00\x00\xff\xff\xff\x21\xf9\x04\x01\x00\x00\x00\x00";

    let result = extract_bytes(bytes, "https://example.com/pixel.gif");
    match result {
        Ok(result) => {
            assert_eq!(result.status, ExtractionStatus::Failed);
            assert_eq!(result.parser, ParserKind::Generic);
            assert_eq!(result.document, Document::empty("https://example.com/pixel.gif"));
            assert!(!result.warnings.is_empty());
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn utf8_bytes_with_bom_are_decoded() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice("<html><head><title>Grüße</title></head><body><p>Straße</p></body></html>".as_bytes());

    let result = extract_bytes(&bytes, "https://example.de/");
    match result {
        Ok(result) => {
            assert_eq!(result.document.title.as_deref(), Some("Grüße"));
            assert_eq!(result.document.text, "Straße");
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn windows_1252_declared_charset_is_honored() {
    let bytes = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1252\"><title>Quotes</title></head><body><p>\x93quoted\x94</p></body></html>";

    let result = extract_bytes(bytes, "https://example.com/");
    match result {
        Ok(result) => assert_eq!(result.document.text, "\u{201c}quoted\u{201d}"),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn empty_input_is_partial_not_an_error() {
    for html in ["", "   ", "<html></html>"] {
        let result = extract(html, "https://example.com/");
        match result {
            Ok(result) => {
                assert_eq!(result.status, ExtractionStatus::Partial, "input {html:?}");
                assert!(result.document.text.is_empty());
                assert_eq!(result.document.url, "https://example.com/");
            }
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }
}

#[test]
fn reddit_host_alone_does_not_pick_reddit_parser() {
    let html = "<html><head><title>Wiki</title></head><body><p>Community rules.</p></body></html>";

    let result = extract(html, "https://www.reddit.com/r/rust/wiki/rules/");
    match result {
        Ok(result) => {
            assert_eq!(result.parser, ParserKind::Generic);
            assert_eq!(result.status, ExtractionStatus::Success);
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}
