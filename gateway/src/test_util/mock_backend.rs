use serde_json::{json, Value};

/// Backend `/chat` reply with `answer` and the given `(origin, page, score)` sources.
pub fn chat_reply(answer: &str, sources: &[(&str, u32, f64)]) -> Value {
    let sumber: Vec<Value> = sources
        .iter()
        .map(|(origin, page, score)| {
            json!({
                "source": origin,
                "page": page,
                "doc_type": "undang-undang",
                "score": score,
                "retrieval_source": "hybrid"
            })
        })
        .collect();

    json!({
        "jawaban": answer,
        "sumber": sumber,
        "konteks": null,
        "pertanyaan": "Apa itu wanprestasi?"
    })
}

/// Minimal reply: only the fields the backend is guaranteed to send.
pub fn minimal_reply(answer: &str) -> Value {
    json!({ "jawaban": answer, "sumber": [] })
}

/// Backend `/health` reply once the pipeline is up.
pub fn health_reply() -> Value {
    json!({
        "status": "healthy",
        "pipeline_initialized": true,
        "components": { "bm25": true, "pinecone": true, "llm": true }
    })
}

/// FastAPI-style error body.
pub fn error_reply(detail: &str) -> Value {
    json!({ "detail": detail })
}
