fn main() {
    if let Err(err) = movie_quiz_lib::run() {
        eprintln!("movie-quiz: {err:#}");
        std::process::exit(1);
    }
}
