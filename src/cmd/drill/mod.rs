// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod get;
mod post;
pub mod server;
mod state;
mod template;

#[cfg(test)]
mod tests {
    use portpicker::pick_unused_port;
    use reqwest::StatusCode;
    use studydeck_core::Timestamp;
    use tempfile::TempDir;
    use tempfile::tempdir;
    use tokio::spawn;

    use crate::cli::wait_for_server;
    use crate::cmd::drill::server::ServerConfig;
    use crate::cmd::drill::server::start_server;
    use crate::db::Database;
    use crate::error::Fallible;

    const TEST_HOST: &str = "127.0.0.1";

    /// Creates a database with one card per (question, answer, days-ago)
    /// triple and returns its path.
    fn seed_db(dir: &TempDir, cards: &[(&str, &str, i64)]) -> String {
        let path = dir.path().join("drill.db").display().to_string();
        let db = Database::open(&path).unwrap();
        for (question, answer, days_ago) in cards {
            db.insert_card(
                question,
                answer,
                "General",
                None,
                Timestamp::now().plus_days(-days_ago),
            )
            .unwrap();
        }
        path
    }

    fn config(db_path: String, port: u16) -> ServerConfig {
        ServerConfig {
            db_path,
            host: TEST_HOST.to_string(),
            port,
            session_started_at: Timestamp::now(),
            card_limit: None,
            category: None,
        }
    }

    async fn post_action(port: u16, action: &str) -> Fallible<String> {
        let response = reqwest::Client::new()
            .post(format!("http://{TEST_HOST}:{port}/"))
            .form(&[("action", action)])
            .send()
            .await?;
        assert!(response.status().is_success());
        Ok(response.text().await?)
    }

    #[tokio::test]
    async fn test_no_cards_due() -> Fallible<()> {
        let dir = tempdir()?;
        let db_path = seed_db(&dir, &[]);
        let port = pick_unused_port().unwrap();
        // Returns immediately without serving anything.
        start_server(config(db_path, port)).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let dir = tempdir()?;
        let db_path = seed_db(&dir, &[("FIRST-QUESTION", "FIRST-ANSWER", 2), ("SECOND-QUESTION", "SECOND-ANSWER", 1)]);
        let port = pick_unused_port().unwrap();
        spawn(async move { start_server(config(db_path, port)).await });
        wait_for_server(TEST_HOST, port).await?;

        // Hit the `style.css` endpoint.
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/style.css")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        // Hit the `script.js` endpoint.
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/script.js")).await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/javascript"
        );

        // Hit the not found endpoint.
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/herp-derp")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // The root shows the oldest due question with the answer hidden.
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/")).await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        let html = response.text().await?;
        assert!(html.contains("FIRST-QUESTION"));
        assert!(!html.contains("FIRST-ANSWER"));
        assert!(html.contains("Card 1 of 2"));

        // Reveal shows the answer and the rating buttons.
        let html = post_action(port, "Reveal").await?;
        assert!(html.contains("FIRST-ANSWER"));
        assert!(html.contains("Good"));

        // Rating moves to the second card.
        let html = post_action(port, "4").await?;
        assert!(html.contains("SECOND-QUESTION"));
        assert!(html.contains("Card 2 of 2"));

        // Reveal and rate the second card to finish.
        let html = post_action(port, "Reveal").await?;
        assert!(html.contains("SECOND-ANSWER"));
        let html = post_action(port, "4").await?;
        assert!(html.contains("Session Completed"));
        assert!(html.contains("Cards reviewed: 2"));

        Ok(())
    }

    #[tokio::test]
    async fn test_rate_without_reveal_is_ignored() -> Fallible<()> {
        let dir = tempdir()?;
        let db_path = seed_db(&dir, &[("ONLY-QUESTION", "ONLY-ANSWER", 1)]);
        let port = pick_unused_port().unwrap();
        spawn(async move { start_server(config(db_path, port)).await });
        wait_for_server(TEST_HOST, port).await?;

        // Rating with the answer still hidden changes nothing.
        let html = post_action(port, "3").await?;
        assert!(html.contains("ONLY-QUESTION"));
        assert!(!html.contains("ONLY-ANSWER"));
        assert!(html.contains("Card 1 of 1"));

        Ok(())
    }

    #[tokio::test]
    async fn test_end() -> Fallible<()> {
        let dir = tempdir()?;
        let db_path = seed_db(&dir, &[("Q1", "A1", 1), ("Q2", "A2", 1)]);
        let port = pick_unused_port().unwrap();
        spawn(async move { start_server(config(db_path, port)).await });
        wait_for_server(TEST_HOST, port).await?;

        let html = post_action(port, "End").await?;
        assert!(html.contains("Session Ended"));
        assert!(html.contains("Cards reviewed: 0"));

        Ok(())
    }

    #[tokio::test]
    async fn test_rating_persists_card_and_stats() -> Fallible<()> {
        let dir = tempdir()?;
        let db_path = seed_db(&dir, &[("Q1", "A1", 1)]);
        let port = pick_unused_port().unwrap();
        {
            let db_path = db_path.clone();
            spawn(async move { start_server(config(db_path, port)).await });
        }
        wait_for_server(TEST_HOST, port).await?;

        post_action(port, "Reveal").await?;
        let html = post_action(port, "5").await?;
        assert!(html.contains("Session Completed"));

        let db = Database::open(&db_path)?;
        let card = db.all_cards()?.pop().unwrap();
        assert_eq!(card.scheduling.repetitions, 1);
        assert_eq!(card.scheduling.interval_days, 1);
        assert!(card.scheduling.last_reviewed_at.is_some());

        let stats = db.load_stats()?;
        assert_eq!(stats.total_cards_reviewed, 1);
        assert_eq!(stats.current_streak, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_card_limit() -> Fallible<()> {
        let dir = tempdir()?;
        let db_path = seed_db(&dir, &[("Q1", "A1", 3), ("Q2", "A2", 2), ("Q3", "A3", 1)]);
        let port = pick_unused_port().unwrap();
        let mut config = config(db_path, port);
        config.card_limit = Some(2);
        spawn(async move { start_server(config).await });
        wait_for_server(TEST_HOST, port).await?;

        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/")).await?;
        let html = response.text().await?;
        assert!(html.contains("Card 1 of 2"));

        Ok(())
    }
}
