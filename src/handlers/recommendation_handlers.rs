use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Recommendation {
    id: String,
    r#type: String,
    title: String,
    description: String,
}

// Static picks surfaced in the recommendations rail. Same list on every call.
pub async fn get_recommendations() -> Json<Vec<Recommendation>> {
    Json(vec![
        Recommendation {
            id: "1".to_string(),
            r#type: "new".to_string(),
            title: "Neural Integration Guide".to_string(),
            description: "Learn how to integrate our neural networks with your existing systems"
                .to_string(),
        },
        Recommendation {
            id: "2".to_string(),
            r#type: "popular".to_string(),
            title: "Machine Learning Masterclass".to_string(),
            description: "A comprehensive guide to our ML algorithms and applications".to_string(),
        },
        Recommendation {
            id: "3".to_string(),
            r#type: "trending".to_string(),
            title: "Automation Workflow Templates".to_string(),
            description: "Ready-to-use templates to jumpstart your automation journey".to_string(),
        },
    ])
}
