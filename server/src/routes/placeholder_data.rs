use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    id: i64,
    title: &'static str,
    director: &'static str,
    release_date: &'static str,
    synopsis: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    id: i64,
    title: &'static str,
    release_date: &'static str,
}

const MOVIES: [Movie; 2] = [
    Movie {
        id: 1,
        title: "Dr. Strangelove",
        director: "Stanley Kubrick",
        release_date: "2/29/1964",
        synopsis: "An American general puts the world on the verge of catastrophe when he orders an attack on the Soviet Union. Soon, a war council tries to put a stop to it before it is too late.",
    },
    Movie {
        id: 2,
        title: "12 Angry Men",
        director: "Sidney Lumet",
        release_date: "11/4/1958",
        synopsis: "An eighteen-year-old Latino is accused of having stabbed his father to death. He is presented in a courtroom before a twelve-man jury. Eleven out of the twelve men vote guilty, except for Mr. Davis.",
    },
];

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/:id", get(detail))
}

async fn list() -> Json<Vec<MovieSummary>> {
    Json(
        MOVIES
            .iter()
            .map(|movie| MovieSummary {
                id: movie.id,
                title: movie.title,
                release_date: movie.release_date,
            })
            .collect(),
    )
}

async fn detail(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Movie>> {
    state.latency.sleep(2.5).await;
    MOVIES
        .iter()
        .find(|movie| movie.id == id)
        .copied()
        .map(Json)
        .ok_or(ApiError::NotFound)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::*;

    #[tokio::test]
    async fn list_omits_details() {
        let movies = send_json(&state(), get("/placeholder-data")).await;
        assert_eq!(2, movies.as_array().unwrap().len());
        assert_eq!("Dr. Strangelove", movies[0]["title"]);
        assert_eq!("2/29/1964", movies[0]["releaseDate"]);
        assert!(movies[0].get("synopsis").is_none());
    }

    #[tokio::test]
    async fn detail_includes_the_director() {
        let movie = send_json(&state(), get("/placeholder-data/2")).await;
        assert_eq!("Sidney Lumet", movie["director"]);
    }

    #[tokio::test]
    async fn unknown_movie_is_not_found() {
        let (status, body) = send(&state(), get("/placeholder-data/3")).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!("Not found", body);
    }
}
