use std::{fmt, io, path::PathBuf};

/// The json documents the CLI reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Rules,
    Passages,
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rules => f.write_str("rules"),
            Self::Passages => f.write_str("passages"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not open the {input} file `{}`: {error}", .path.display())]
    Open {
        input: Input,
        path: PathBuf,
        error: io::Error,
    },
    #[error("Could not parse the {input} from `{origin}`: {error}")]
    Parse {
        input: Input,
        origin: String,
        error: serde_json::Error,
    },
    #[error("Could not serialize the report: {0}")]
    Serialize(serde_json::Error),
    #[error("The fee schedule has {0} fatal warning(s)")]
    InvalidSchedule(usize),
    /// Invalid rules or passages rejected by the calculation.
    #[error("{0}")]
    Calculation(#[from] congestion_tax::Error),
}

impl Error {
    pub fn open(input: Input, path: PathBuf, error: io::Error) -> Self {
        Self::Open { input, path, error }
    }

    /// `origin` is the file name, or `<stdin>`.
    pub fn parse(input: Input, origin: impl fmt::Display, error: serde_json::Error) -> Self {
        Self::Parse {
            input,
            origin: origin.to_string(),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use chrono::NaiveDate;

    use super::{Error, Input};

    #[test]
    fn open_error_names_the_input() {
        let err = Error::open(
            Input::Rules,
            "gothenburg.json".into(),
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );

        assert_eq!(
            err.to_string(),
            "Could not open the rules file `gothenburg.json`: not found"
        );
    }

    #[test]
    fn parse_error_names_the_origin() {
        let json_err = serde_json::from_str::<u32>("{").unwrap_err();
        let err = Error::parse(Input::Passages, "<stdin>", json_err);

        assert!(err
            .to_string()
            .starts_with("Could not parse the passages from `<stdin>`: "));
    }

    #[test]
    fn calculation_errors_are_shown_as_is() {
        let first = NaiveDate::from_ymd_opt(2013, 2, 7).unwrap();
        let other = NaiveDate::from_ymd_opt(2013, 2, 8).unwrap();
        let inner = congestion_tax::Error::MixedDays { first, other };
        let err = Error::from(inner.clone());

        assert_eq!(err.to_string(), inner.to_string());
    }
}
