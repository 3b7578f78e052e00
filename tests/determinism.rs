mod common;

use common::{deep_sections, deep_store, rrc_document, strings, CountingStore, RRC_ID};
use section_retrieval::document::DocumentId;
use section_retrieval::store::MemoryStore;
use section_retrieval::types::{ContentDigest, ErrorKind};
use section_retrieval::{RetrievalConfig, SectionRetriever};

#[test]
fn repeated_retrievals_are_byte_identical() {
    let retriever = SectionRetriever::new(deep_store());
    let id = DocumentId::new(RRC_ID);
    let pats = strings(&["5", "6"]);

    let first = retriever.retrieve(&id, &pats).unwrap();
    let second = retriever.retrieve(&id, &pats).unwrap();

    assert_eq!(first.markdown.as_bytes(), second.markdown.as_bytes());
    assert_eq!(first.digest, second.digest);
    assert_eq!(first.metadata.render_version, second.metadata.render_version);
}

#[test]
fn stored_section_order_does_not_affect_output() {
    let mut reversed = deep_sections();
    reversed.reverse();

    let a = SectionRetriever::new(deep_store());
    let b = SectionRetriever::new(
        MemoryStore::new()
            .with_document(rrc_document(), reversed)
            .unwrap(),
    );
    let id = DocumentId::new(RRC_ID);

    let pats = strings(&["5.2", "6"]);
    assert_eq!(
        a.render_sections(&id, &pats).unwrap(),
        b.render_sections(&id, &pats).unwrap()
    );
}

#[test]
fn pattern_order_does_not_affect_output() {
    let retriever = SectionRetriever::new(deep_store());
    let id = DocumentId::new(RRC_ID);

    assert_eq!(
        retriever.render_sections(&id, &strings(&["6", "5.3", "5.2"])).unwrap(),
        retriever.render_sections(&id, &strings(&["5.2", "5.3", "6"])).unwrap()
    );
}

#[test]
fn digest_is_sha256_of_markdown() {
    let retriever = SectionRetriever::new(deep_store());
    let result = retriever
        .retrieve(&DocumentId::new(RRC_ID), &strings(&["5.3"]))
        .unwrap();

    assert_eq!(
        result.digest,
        ContentDigest::from_content(result.markdown.as_bytes())
    );
}

#[test]
fn render_version_tracks_config() {
    let id = DocumentId::new(RRC_ID);
    let pats = strings(&["5.3"]);

    let default = SectionRetriever::new(deep_store())
        .retrieve(&id, &pats)
        .unwrap();

    let mut config = RetrievalConfig::v0();
    config.version = "2".into();
    let bumped = SectionRetriever::new(deep_store())
        .with_config(config)
        .retrieve(&id, &pats)
        .unwrap();

    assert_eq!(default.markdown, bumped.markdown);
    assert_eq!(default.digest, bumped.digest);
    assert_ne!(default.metadata.render_version, bumped.metadata.render_version);
}

#[test]
fn config_loads_from_json_with_defaults() {
    let config =
        RetrievalConfig::from_json_str(r#"{"version":"1","hash_algorithm":"sha256"}"#).unwrap();
    assert_eq!(config.version, "1");
    assert!(config.log_matched_headings);
    assert_eq!(config, RetrievalConfig::v0());

    let quiet = RetrievalConfig::from_json_str(
        r#"{"version":"1","hash_algorithm":"sha256","log_matched_headings":false}"#,
    )
    .unwrap();
    assert!(!quiet.log_matched_headings);

    assert_eq!(RetrievalConfig::default(), RetrievalConfig::v0());
    assert!(RetrievalConfig::from_json_str("{}").is_err());
}

#[test]
fn unsupported_hash_algorithm_is_rejected_before_store_access() {
    let mut config = RetrievalConfig::v0();
    config.hash_algorithm = "md5".into();

    let store = CountingStore::new(deep_store());
    let err = SectionRetriever::new(&store)
        .with_config(config)
        .retrieve(&DocumentId::new(RRC_ID), &strings(&["5.3"]))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(err.to_string().contains("md5"));
    assert_eq!(store.calls(), 0);
}
