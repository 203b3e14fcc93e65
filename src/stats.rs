use crate::models::{Movie, RatingActivity, Stats};

/// Computes aggregate viewing statistics over a fetched collection
///
/// Pure: no network, no stored state, the input is never mutated. The
/// shipped flow feeds it the first catalog page only, so the counts
/// understate users with ratings beyond page one; callers that want more
/// must fetch more. The favorite genre is the first distinct genre
/// encountered in fetch order, not the most frequent one.
pub fn compute(movies: &[Movie]) -> Stats {
    let watched: Vec<&Movie> = movies.iter().filter(|m| m.user_rating.is_some()).collect();

    let average_rating = if watched.is_empty() {
        "0".to_string()
    } else {
        let sum: u32 = watched
            .iter()
            .filter_map(|m| m.user_rating.map(u32::from))
            .sum();
        format!("{:.1}", f64::from(sum) / watched.len() as f64)
    };

    let mut genres: Vec<&str> = Vec::new();
    for movie in &watched {
        if !genres.contains(&movie.genre.as_str()) {
            genres.push(movie.genre.as_str());
        }
    }

    Stats {
        movies_watched: watched.len(),
        average_rating,
        genres_explored: genres.len(),
        favorite_genre: genres.first().map(|genre| genre.to_string()),
        last_rated: watched.first().map(|movie| movie.title.clone()),
    }
}

/// Client-side stand-in for the recent-activity feed
///
/// First `limit` rated movies in fetch order; dates are unknown here, the
/// server endpoint is the source for those.
pub fn recent_activity(movies: &[Movie], limit: usize) -> Vec<RatingActivity> {
    movies
        .iter()
        .filter_map(|movie| {
            movie.user_rating.map(|rating| RatingActivity {
                movie: movie.title.clone(),
                rating,
                date: String::new(),
            })
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, genre: &str, rating: Option<u8>) -> Movie {
        Movie {
            id: title.to_lowercase().replace(' ', "-"),
            title: title.to_string(),
            genre: genre.to_string(),
            description: String::new(),
            release_date: String::new(),
            poster_url: None,
            user_rating: rating,
        }
    }

    #[test]
    fn test_compute_empty_collection() {
        let stats = compute(&[]);
        assert_eq!(stats.movies_watched, 0);
        assert_eq!(stats.average_rating, "0");
        assert_eq!(stats.genres_explored, 0);
        assert_eq!(stats.favorite_genre, None);
        assert_eq!(stats.last_rated, None);
    }

    #[test]
    fn test_compute_mixed_ratings() {
        let movies = vec![
            movie("The Godfather", "Drama", Some(4)),
            movie("Heat", "Drama", Some(2)),
            movie("Die Hard", "Action", Some(5)),
        ];

        let stats = compute(&movies);
        assert_eq!(stats.movies_watched, 3);
        assert_eq!(stats.average_rating, "3.7");
        assert_eq!(stats.genres_explored, 2);
        assert_eq!(stats.favorite_genre, Some("Drama".to_string()));
        assert_eq!(stats.last_rated, Some("The Godfather".to_string()));
    }

    #[test]
    fn test_compute_skips_unrated_movies() {
        let movies = vec![
            movie("Alien", "Horror", None),
            movie("Heat", "Drama", Some(3)),
        ];

        let stats = compute(&movies);
        assert_eq!(stats.movies_watched, 1);
        assert_eq!(stats.average_rating, "3.0");
        // The unrated movie's genre does not count as explored
        assert_eq!(stats.genres_explored, 1);
        assert_eq!(stats.favorite_genre, Some("Drama".to_string()));
    }

    #[test]
    fn test_compute_does_not_mutate_input() {
        let movies = vec![movie("Heat", "Drama", Some(3))];
        let before = movies.clone();

        compute(&movies);
        assert_eq!(movies, before);
    }

    #[test]
    fn test_favorite_genre_is_first_encountered_not_most_frequent() {
        let movies = vec![
            movie("Alien", "Horror", Some(5)),
            movie("Heat", "Drama", Some(4)),
            movie("The Godfather", "Drama", Some(5)),
            movie("Casino", "Drama", Some(3)),
        ];

        let stats = compute(&movies);
        assert_eq!(stats.favorite_genre, Some("Horror".to_string()));
    }

    #[test]
    fn test_recent_activity_takes_rated_in_order() {
        let movies = vec![
            movie("Alien", "Horror", Some(5)),
            movie("Solaris", "Sci-Fi", None),
            movie("Heat", "Drama", Some(4)),
            movie("Casino", "Drama", Some(3)),
        ];

        let activity = recent_activity(&movies, 2);
        assert_eq!(activity.len(), 2);
        assert_eq!(activity[0].movie, "Alien");
        assert_eq!(activity[0].rating, 5);
        assert_eq!(activity[1].movie, "Heat");
        assert!(activity[0].date.is_empty());
    }
}
