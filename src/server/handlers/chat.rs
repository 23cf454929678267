use axum::extract::{Extension, Json};

use super::json::JsonBody;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct AskParams {
    question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Answer {
    answer: String,
}

pub async fn ask(
    Extension(api): Extension<DynAPI>,
    JsonBody(params): JsonBody<AskParams>,
) -> Result<Json<Answer>, Error> {
    let answer = api.ask(params.question).await?;

    Ok(Answer { answer }.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::Fakes;
    use crate::server::handlers::tests::api;

    #[tokio::test]
    async fn answers_the_question() {
        let fakes = Fakes::new("Calibre os pneus com 32 psi.");

        let Json(answer) = ask(
            Extension(api(&fakes)),
            JsonBody(AskParams {
                question: "Qual a calibragem?".into(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(answer.answer, "Calibre os pneus com 32 psi.");
    }
}
