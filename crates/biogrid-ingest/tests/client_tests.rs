//! Integration tests for the BioGRID client against a mock service
//!
//! These cover:
//! - query parameters on the wire for every search mode
//! - status and transport error mapping
//! - JSON and tab-delimited normalization end to end

use biogrid_common::BiogridConfig;
use biogrid_ingest::biogrid::{
    BiogridClient, FetchError, InteractionQuery, ResponseFormat, SearchMode,
};
use biogrid_ingest::filter::filter_positive_sorted;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const API_KEY: &str = "integration-key";

fn config_for(server: &MockServer) -> BiogridConfig {
    BiogridConfig::builder(API_KEY)
        .base_url(format!("{}/interactions/", server.uri()))
        .timeout_secs(2)
        .build()
        .expect("valid test config")
}

fn tab_line(id: u64, symbol_b: &str, score: &str) -> String {
    format!(
        "{id}\t7157\t4193\t112315\t110358\t-\t-\tTP53\t{symbol_b}\tP53|TRP53\t-\tAffinity Capture-Western\tphysical\tSmith J (2020)\t3200000\t9606\t9606\tLow Throughput\t{score}\t-\t-\t-\t-\tBIOGRID"
    )
}

#[tokio::test]
async fn test_each_search_mode_sends_one_flag() {
    for mode in SearchMode::ALL {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/interactions/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let client = BiogridClient::from_config(&config).expect("client");
        let query = InteractionQuery::new("TP53", mode);

        client
            .build_and_fetch(&query, &config.access_key)
            .await
            .expect("request succeeds");

        let requests = server.received_requests().await.expect("recording enabled");
        assert_eq!(requests.len(), 1);

        let flags: Vec<(String, String)> = requests[0]
            .url
            .query_pairs()
            .into_owned()
            .filter(|(name, _)| SearchMode::flag_names().contains(&name.as_str()))
            .collect();

        let (flag, value) = mode.query_flag();
        assert_eq!(flags, vec![(flag.to_string(), value.to_string())], "mode {}", mode);
    }
}

#[tokio::test]
async fn test_query_parameters_on_the_wire() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/interactions/"))
        .and(query_param("accesskey", API_KEY))
        .and(query_param("geneList", "BRCA1 & co"))
        .and(query_param("taxId", "10090"))
        .and(query_param("includeInteractors", "true"))
        .and(query_param("format", "json"))
        .and(query_param("max", "5"))
        .and(query_param("searchNames", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"entries": []}"#))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = BiogridClient::from_config(&config).expect("client");
    let query = InteractionQuery::new("BRCA1 & co", SearchMode::Name)
        .taxonomy_id("10090")
        .include_interactors(true)
        .max_results(5)
        .format(ResponseFormat::Json);

    let records = client
        .fetch_interactions(&query, &config.access_key)
        .await
        .expect("request succeeds");

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_http_500_maps_to_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/interactions/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = BiogridClient::from_config(&config).expect("client");
    let query = InteractionQuery::new("TP53", SearchMode::Name);

    let err = client
        .fetch_interactions(&query, &config.access_key)
        .await
        .expect_err("500 must fail");

    assert_eq!(err, FetchError::HttpStatus(500));
}

#[tokio::test]
async fn test_http_403_maps_to_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = BiogridClient::from_config(&config).expect("client");
    let query = InteractionQuery::new("TP53", SearchMode::Id);

    let err = client
        .build_and_fetch(&query, &config.access_key)
        .await
        .expect_err("403 must fail");

    assert_eq!(err, FetchError::HttpStatus(403));
}

#[tokio::test]
async fn test_timeout_maps_to_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(5)))
        .mount(&server)
        .await;

    let config = BiogridConfig::builder(API_KEY)
        .base_url(format!("{}/interactions/", server.uri()))
        .timeout_secs(1)
        .build()
        .expect("valid test config");
    let client = BiogridClient::from_config(&config).expect("client");
    let query = InteractionQuery::new("TP53", SearchMode::Name);

    let err = client
        .build_and_fetch(&query, &config.access_key)
        .await
        .expect_err("request must time out");

    match err {
        FetchError::Transport(message) => assert!(!message.contains(API_KEY)),
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused_maps_to_transport_error() {
    // Nothing listens on port 1 of the loopback interface.
    let config = BiogridConfig::builder(API_KEY)
        .base_url("http://127.0.0.1:1/interactions/")
        .build()
        .expect("valid test config");
    let client = BiogridClient::from_config(&config).expect("client");
    let query = InteractionQuery::new("TP53", SearchMode::Name);

    let err = client
        .build_and_fetch(&query, &config.access_key)
        .await
        .expect_err("nothing is listening");

    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn test_json_response_normalized_in_order() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "entries": [
            {"interactions": [{
                "interactionId": 11, "interactionType": "physical", "evidence": "Two-hybrid",
                "interactors": [
                    {"geneId": 7157, "officialSymbol": "TP53", "synonyms": ["P53"], "organismName": "Homo sapiens", "taxId": 9606},
                    {"geneId": 4193, "officialSymbol": "MDM2", "synonyms": ["HDMX"], "organismName": "Homo sapiens", "taxId": 9606}
                ]
            }]},
            {"interactions": [{
                "interactionId": 12, "interactionType": "genetic", "evidence": "Synthetic Lethality",
                "interactors": [
                    {"geneId": 7157, "officialSymbol": "TP53"},
                    {"geneId": 2033, "officialSymbol": "EP300"}
                ]
            }]}
        ]
    });

    Mock::given(method("GET"))
        .and(path("/interactions/"))
        .and(query_param("format", "jsonExtended"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = BiogridClient::from_config(&config).expect("client");
    let query =
        InteractionQuery::new("TP53", SearchMode::Name).format(ResponseFormat::JsonExtended);

    let records = client
        .fetch_interactions(&query, &config.access_key)
        .await
        .expect("request succeeds");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].interaction_id, Some(11));
    assert_eq!(records[1].interaction_id, Some(12));
    assert!(records.iter().all(|r| r.interactors.len() == 2));
    assert_eq!(records[1].interactors[1].official_symbol.as_deref(), Some("EP300"));
    assert_eq!(records[1].interactors[1].organism_name, None);
}

#[tokio::test]
async fn test_tab_response_filtered_by_score() {
    let server = MockServer::start().await;

    let body = format!(
        "# BioGRID tab2 export\n{}\n{}\n{}\n",
        tab_line(1, "MDM2", "-"),
        tab_line(2, "MDM4", "5"),
        tab_line(3, "EP300", "2"),
    );

    Mock::given(method("GET"))
        .and(path("/interactions/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = BiogridClient::from_config(&config).expect("client");
    let query = InteractionQuery::new("TP53", SearchMode::Name);

    let records = client
        .fetch_interactions(&query, &config.access_key)
        .await
        .expect("request succeeds");
    assert_eq!(records.len(), 3);

    let scored = filter_positive_sorted(records, |r| r.score());
    let ids: Vec<_> = scored.iter().map(|r| r.interaction_id).collect();
    assert_eq!(ids, vec![Some(2), Some(3)]);
}
