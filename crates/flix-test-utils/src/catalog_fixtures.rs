//! Seed movie catalog for integration tests
//!
//! Deterministic movie records so tests can assert on titles, genres and
//! directors without building their own data. IDs come from
//! [`crate::test_ids`].

use crate::test_ids::{TEST_MOVIE_ALIEN, TEST_MOVIE_INCEPTION, TEST_MOVIE_SEVEN_SAMURAI};
use chrono::NaiveDate;
use flix_service::models::{Director, Genre, Movie};

/// The full seed catalog: three movies with distinct genres and directors.
///
/// One director carries a death date and one movie has no image path, so
/// optional fields are exercised in both states.
pub fn sample_movies() -> Vec<Movie> {
    vec![inception(), alien(), seven_samurai()]
}

fn inception() -> Movie {
    Movie {
        id: TEST_MOVIE_INCEPTION,
        title: "Inception".to_string(),
        description: "A thief who steals corporate secrets through dream-sharing \
                      technology is given the inverse task of planting an idea in \
                      a target's mind."
            .to_string(),
        genre: Genre {
            name: "Thriller".to_string(),
            description: "Suspense-driven stories built around tension and high stakes."
                .to_string(),
        },
        director: Director {
            name: "Christopher Nolan".to_string(),
            bio: "British-American filmmaker known for cerebral, often nonlinear storytelling."
                .to_string(),
            birth: NaiveDate::from_ymd_opt(1970, 7, 30),
            death: None,
        },
        actors: vec![
            "Leonardo DiCaprio".to_string(),
            "Joseph Gordon-Levitt".to_string(),
            "Elliot Page".to_string(),
        ],
        image_path: Some("inception.png".to_string()),
        featured: true,
    }
}

fn alien() -> Movie {
    Movie {
        id: TEST_MOVIE_ALIEN,
        title: "Alien".to_string(),
        description: "The crew of a commercial spacecraft encounters a lethal \
                      lifeform after investigating a distress signal on a desolate moon."
            .to_string(),
        genre: Genre {
            name: "Horror".to_string(),
            description: "Films built to frighten, whether by atmosphere or by shock."
                .to_string(),
        },
        director: Director {
            name: "Ridley Scott".to_string(),
            bio: "English director and producer whose work spans science fiction \
                  and historical epics."
                .to_string(),
            birth: NaiveDate::from_ymd_opt(1937, 11, 30),
            death: None,
        },
        actors: vec!["Sigourney Weaver".to_string(), "Tom Skerritt".to_string()],
        image_path: Some("alien.png".to_string()),
        featured: false,
    }
}

fn seven_samurai() -> Movie {
    Movie {
        id: TEST_MOVIE_SEVEN_SAMURAI,
        title: "Seven Samurai".to_string(),
        description: "A poor village under attack by bandits recruits seven \
                      unemployed samurai to help defend itself."
            .to_string(),
        genre: Genre {
            name: "Drama".to_string(),
            description: "Character-driven stories where conflict unfolds through \
                          realistic stakes rather than spectacle."
                .to_string(),
        },
        director: Director {
            name: "Akira Kurosawa".to_string(),
            bio: "Japanese filmmaker widely regarded as one of the most influential \
                  directors in cinema history."
                .to_string(),
            birth: NaiveDate::from_ymd_opt(1910, 3, 23),
            death: NaiveDate::from_ymd_opt(1998, 9, 6),
        },
        actors: vec!["Toshiro Mifune".to_string(), "Takashi Shimura".to_string()],
        image_path: None,
        featured: false,
    }
}
