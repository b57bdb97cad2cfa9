//! Integration tests for the Scrapyd client against a mock server.

use mockito::{Matcher, Server};
use scrapyd_client::{ScheduleRequest, ScrapydClient, ScrapydError};

fn schedule_request() -> ScheduleRequest {
    ScheduleRequest {
        project: "jobscrapper".into(),
        spider: "linkedin_jobs".into(),
        domain: "data engineer".into(),
        location: "pune".into(),
        user_id: "user-1".into(),
    }
}

#[tokio::test]
async fn schedule_posts_form_and_returns_jobid() {
    //* Given
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/schedule.json")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("project".into(), "jobscrapper".into()),
            Matcher::UrlEncoded("spider".into(), "linkedin_jobs".into()),
            Matcher::UrlEncoded("domain".into(), "data engineer".into()),
            Matcher::UrlEncoded("location".into(), "pune".into()),
            Matcher::UrlEncoded("user_id".into(), "user-1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"node_name": "n1", "status": "ok", "jobid": "6487ec79"}"#)
        .expect(1)
        .create_async()
        .await;

    //* When
    let client = ScrapydClient::new(server.url());
    let job_id = client
        .schedule(&schedule_request())
        .await
        .and_then(|resp| resp.accepted_job_id())
        .expect("schedule should succeed");

    //* Then
    mock.assert_async().await;
    assert_eq!(job_id, "6487ec79");
}

#[tokio::test]
async fn schedule_surfaces_http_status() {
    //* Given
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/schedule.json")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    //* When
    let client = ScrapydClient::new(server.url());
    let err = client.schedule(&schedule_request()).await.unwrap_err();

    //* Then
    assert!(matches!(err, ScrapydError::Api { status: 500, ref message } if message == "boom"));
}

#[tokio::test]
async fn schedule_rejects_error_status_body() {
    //* Given
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/schedule.json")
        .with_status(200)
        .with_body(r#"{"status": "error", "message": "spider not found"}"#)
        .create_async()
        .await;

    //* When
    let client = ScrapydClient::new(server.url());
    let err = client
        .schedule(&schedule_request())
        .await
        .and_then(|resp| resp.accepted_job_id())
        .unwrap_err();

    //* Then
    assert!(matches!(err, ScrapydError::Rejected(ref m) if m == "spider not found"));
}

#[tokio::test]
async fn schedule_treats_garbage_body_as_malformed() {
    //* Given
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/schedule.json")
        .with_status(200)
        .with_body("<html>proxy error</html>")
        .create_async()
        .await;

    //* When
    let client = ScrapydClient::new(server.url());
    let err = client.schedule(&schedule_request()).await.unwrap_err();

    //* Then
    assert!(matches!(err, ScrapydError::Malformed(_)));
}

#[tokio::test]
async fn list_jobs_queries_project_and_parses_buckets() {
    //* Given
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/listjobs.json")
        .match_query(Matcher::UrlEncoded("project".into(), "jobscrapper".into()))
        .with_status(200)
        .with_body(
            r#"{
                "node_name": "n1",
                "status": "ok",
                "pending": [{"id": "p1", "spider": "internshala_jobs"}],
                "running": [],
                "finished": [{"id": "f1", "spider": "linkedin_jobs", "end_time": "2024-01-01 10:00:00"}]
            }"#,
        )
        .expect(1)
        .create_async()
        .await;

    //* When
    let client = ScrapydClient::new(format!("{}/", server.url()));
    let listing = client.list_jobs("jobscrapper").await.unwrap();

    //* Then
    mock.assert_async().await;
    let (bucket, job) = listing.find("f1").unwrap();
    assert_eq!(bucket, "finished");
    assert_eq!(job.spider.as_deref(), Some("linkedin_jobs"));
    assert_eq!(listing.find("p1").map(|(b, _)| b), Some("pending"));
}

#[tokio::test]
async fn daemon_status_parses_counts() {
    //* Given
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/daemonstatus.json")
        .with_status(200)
        .with_body(r#"{"node_name": "n1", "status": "ok", "pending": 0, "running": 2, "finished": 7}"#)
        .create_async()
        .await;

    //* When
    let client = ScrapydClient::new(server.url());
    let status = client.daemon_status().await.unwrap();

    //* Then
    assert_eq!(status.status, "ok");
    assert_eq!(status.running, 2);
    assert_eq!(status.finished, 7);
}
