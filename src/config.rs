//! Command-line and environment configuration for the `showcase` binary.

use std::net::SocketAddr;

use clap::Parser;

use crate::lessons::Lesson;

/// Serve one tutorial lesson over HTTP.
#[derive(Debug, Parser)]
#[command(name = "showcase", version, about)]
pub struct Config {
    /// Lesson to serve.
    #[arg(long, env = "SHOWCASE_LESSON", value_enum, default_value_t = Lesson::Social)]
    pub lesson: Lesson,

    /// Address to listen on.
    #[arg(long, env = "SHOWCASE_ADDR", default_value = "127.0.0.1:8000")]
    pub addr: SocketAddr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lesson_and_address() {
        let config = Config::try_parse_from([
            "showcase",
            "--lesson",
            "full-crud",
            "--addr",
            "0.0.0.0:3000",
        ])
        .unwrap();
        assert_eq!(config.lesson, Lesson::FullCrud);
        assert_eq!(config.addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn rejects_unknown_lessons() {
        assert!(Config::try_parse_from(["showcase", "--lesson", "graphql"]).is_err());
    }
}
