use std::path::Path;
use std::sync::Arc;
use taskboard::{BoardContext, BoardDocument, Card};
use taskboard_cli::commands::{board, cards, init, open_session};
use taskboard_cli::{CardFields, CardsCommand, Config};
use taskboard_client::SyncMode;
use taskboard_server::{start_server, ServerConfig};
use tempfile::TempDir;

fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

fn offline_config(dir: &Path) -> Config {
    Config {
        data_file: dir.join("data.json"),
        server_url: closed_port_url(),
        local_store_dir: Some(dir.join("local")),
        ..Config::default()
    }
}

async fn run_cards(config: &Config, command: CardsCommand) -> anyhow::Result<String> {
    let mut session = open_session(config).await;
    cards::run(&mut session, command).await
}

fn list_json() -> CardsCommand {
    CardsCommand::List {
        column: None,
        assignee: None,
        json: true,
    }
}

#[tokio::test]
async fn test_init_creates_board_once() {
    let temp = TempDir::new().unwrap();
    let config = offline_config(temp.path());

    let out = init::run(&config, Some(vec!["todo".into(), "doing".into(), "done".into()]), false)
        .await
        .unwrap();
    assert!(out.contains("[todo, doing, done]"));

    let doc: BoardDocument =
        serde_json::from_str(&std::fs::read_to_string(&config.data_file).unwrap()).unwrap();
    assert_eq!(doc.columns.len(), 3);
    assert!(doc.cards.is_empty());

    assert!(init::run(&config, None, true).await.is_err());
}

#[tokio::test]
async fn test_offline_cards_use_local_store() {
    let temp = TempDir::new().unwrap();
    let config = offline_config(temp.path());

    let session = open_session(&config).await;
    assert_eq!(session.mode(), SyncMode::Local);

    let out = run_cards(
        &config,
        CardsCommand::Add {
            title: "Offline card".into(),
            fields: CardFields {
                column: Some("review".into()),
                ..CardFields::default()
            },
        },
    )
    .await
    .unwrap();
    assert_eq!(out, "Created card 100 in review");

    let listed: Vec<Card> = serde_json::from_str(&run_cards(&config, list_json()).await.unwrap()).unwrap();
    assert_eq!(listed.len(), 6);

    run_cards(
        &config,
        CardsCommand::Move {
            id: "100".into(),
            column: "done".into(),
        },
    )
    .await
    .unwrap();
    let done = run_cards(
        &config,
        CardsCommand::List {
            column: Some("done".into()),
            assignee: None,
            json: true,
        },
    )
    .await
    .unwrap();
    assert!(done.contains("Offline card"));

    let out = run_cards(&config, CardsCommand::Delete { id: "100".into() })
        .await
        .unwrap();
    assert!(out.starts_with("Deleted card 100"));
    assert!(run_cards(&config, CardsCommand::Delete { id: "100".into() })
        .await
        .is_err());
}

#[tokio::test]
async fn test_blank_title_is_ignored() {
    let temp = TempDir::new().unwrap();
    let config = offline_config(temp.path());

    let out = run_cards(
        &config,
        CardsCommand::Add {
            title: "   ".into(),
            fields: CardFields::default(),
        },
    )
    .await
    .unwrap();
    assert_eq!(out, "Nothing saved: title is empty");
}

#[tokio::test]
async fn test_cards_against_running_server() {
    let temp = TempDir::new().unwrap();
    let data_file = temp.path().join("data.json");
    let ctx = Arc::new(BoardContext::from_path(&data_file));
    ctx.write_board(&BoardDocument::default()).await.unwrap();
    let server = start_server(ctx, ServerConfig::ephemeral()).await.unwrap();

    let config = Config {
        data_file: data_file.clone(),
        server_url: server.url(),
        local_store_dir: Some(temp.path().join("local")),
        ..Config::default()
    };

    let out = run_cards(
        &config,
        CardsCommand::Add {
            title: "Served card".into(),
            fields: CardFields {
                assignee: Some("ALICE".into()),
                priority: Some(taskboard::Priority::High),
                ..CardFields::default()
            },
        },
    )
    .await
    .unwrap();
    assert!(out.starts_with("Created card "));

    let doc: BoardDocument =
        serde_json::from_str(&std::fs::read_to_string(&data_file).unwrap()).unwrap();
    assert_eq!(doc.cards.len(), 1);
    assert_eq!(doc.cards[0].assignee, "ALICE");

    let id = doc.cards[0].id.to_string();
    run_cards(
        &config,
        CardsCommand::Update {
            id: id.clone(),
            title: Some("Renamed".into()),
            fields: CardFields::default(),
        },
    )
    .await
    .unwrap();
    let shown = run_cards(&config, CardsCommand::Show { id }).await.unwrap();
    assert!(shown.starts_with("Renamed [backlog]"));

    let mut session = open_session(&config).await;
    let rendered = board::run(&mut session, true).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value["mode"], "remote");
    assert_eq!(value["columns"][0]["count"], 1);

    server.shutdown().await;
}
