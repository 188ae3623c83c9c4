//! Integration tests for the schedule API endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::json;
    use tower::util::ServiceExt;

    use crate::test_utils::{body_to_json, body_to_string, test_app};

    fn request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn load_demo(app: &Router) {
        let response = app
            .clone()
            .oneshot(request("POST", "/api/schedule/demo", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    /// Tests a fresh session starts with an empty schedule
    #[tokio::test]
    async fn it_starts_with_an_empty_schedule() {
        let app = test_app();
        let response = app
            .oneshot(request("GET", "/api/schedule", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["events"], json!([]));
        assert_eq!(body["course_name"], serde_json::Value::Null);
    }

    /// Tests edits replace details and renumber events
    #[tokio::test]
    async fn it_replaces_the_schedule() {
        let app = test_app();
        let response = app
            .clone()
            .oneshot(request(
                "PUT",
                "/api/schedule",
                Some(json!({
                    "course_name": "HIST 220",
                    "semester_start": "2025-09-01",
                    "semester_end": "",
                    "events": [
                        {"title": "Essay", "category": "Assignment", "date": "2025-09-19"},
                        {"id": 7, "title": "", "recurring": 1}
                    ]
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["course_name"], "HIST 220");
        assert_eq!(body["semester_start"], "2025-09-01");
        assert_eq!(body["semester_end"], serde_json::Value::Null);
        assert_eq!(body["events"][0]["id"], 1);
        assert_eq!(body["events"][0]["category"], "assignment");
        assert_eq!(body["events"][1]["id"], 7);
        assert_eq!(body["events"][1]["title"], "Untitled event");
        assert_eq!(body["events"][1]["recurring"], true);
    }

    /// Tests the layout endpoint exposes every view
    #[tokio::test]
    async fn it_returns_layout_artifacts() {
        let app = test_app();
        load_demo(&app).await;

        let response = app
            .oneshot(request("GET", "/api/schedule/layout", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;

        assert_eq!(body["range"]["start"], "2026-01-20");
        assert_eq!(body["range"]["end"], "2026-05-10");
        assert_eq!(body["months"].as_array().unwrap().len(), 5);
        assert_eq!(body["months"][0]["heading"], "January 2026");
        assert_eq!(body["chronological"].as_array().unwrap().len(), 8);
        assert_eq!(
            body["chronological"][0]["title"],
            "Essay 1: Spatial Politics"
        );

        let rows = body["weekly"]["rows"].as_array().unwrap();
        let times: Vec<&str> = rows.iter().map(|r| r["time"].as_str().unwrap()).collect();
        assert_eq!(times, vec!["10:00-11:15", "14:00-16:00"]);
        // Monday column of the lecture row
        assert_eq!(rows[0]["days"][0][0]["text"], "Lecture (Slocum 202)");
        assert_eq!(rows[0]["days"][0][0]["source"], "inferred");
    }

    /// Tests generating and downloading a document
    #[tokio::test]
    async fn it_generates_and_serves_documents() {
        let app = test_app();
        load_demo(&app).await;

        let response = app
            .clone()
            .oneshot(request("POST", "/api/schedule/document?format=text", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "inline; filename=\"semester_schedule.txt\""
        );
        let generated = body_to_string(response.into_body()).await;
        assert!(generated.contains("Midterm Exam"));

        let response = app
            .oneshot(request("GET", "/api/schedule/document", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_to_string(response.into_body()).await, generated);
    }

    /// Tests html is the default document format
    #[tokio::test]
    async fn it_defaults_to_html() {
        let app = test_app();
        let response = app
            .oneshot(request("POST", "/api/schedule/document", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        let body = body_to_string(response.into_body()).await;
        assert!(body.contains("No recurring class/office-hours events found."));
        assert!(body.contains("October 2026"));
    }

    /// Tests unknown formats are rejected
    #[tokio::test]
    async fn it_returns_400_for_unknown_formats() {
        let app = test_app();
        let response = app
            .oneshot(request("POST", "/api/schedule/document?format=pdf", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Tests downloading before generating
    #[tokio::test]
    async fn it_returns_404_without_a_generated_document() {
        let app = test_app();
        let response = app
            .oneshot(request("GET", "/api/schedule/document", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    /// Tests clearing drops the schedule and the generated document
    #[tokio::test]
    async fn it_clears_the_session() {
        let app = test_app();
        load_demo(&app).await;
        app.clone()
            .oneshot(request("POST", "/api/schedule/document", None))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(request("DELETE", "/api/schedule", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(request("GET", "/api/schedule/document", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(request("GET", "/api/schedule", None))
            .await
            .unwrap();
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["events"], json!([]));
    }
}
