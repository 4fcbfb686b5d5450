use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::num::ParseIntError;

use crate::primitives::{Distance, Range};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddStation { distance: Distance, ranges: Vec<Range> },
    DemolishStation { distance: Distance },
    AddVehicle { distance: Distance, range: Range },
    ScrapVehicle { distance: Distance, range: Range },
    PlanRoute { source: Distance, destination: Distance },
    /// A word that names no command. Its arguments, if any, are read as further words.
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    AddStation,
    DemolishStation,
    AddVehicle,
    ScrapVehicle,
    PlanRoute,
}

impl Verb {
    fn parse(word: &str) -> Option<Verb> {
        match word {
            "add-station" | "aggiungi-stazione" => Some(Verb::AddStation),
            "demolish-station" | "demolisci-stazione" => Some(Verb::DemolishStation),
            "add-vehicle" | "aggiungi-auto" => Some(Verb::AddVehicle),
            "scrap-vehicle" | "rottama-auto" => Some(Verb::ScrapVehicle),
            "plan-route" | "pianifica-percorso" => Some(Verb::PlanRoute),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Verb::AddStation => "add-station",
            Verb::DemolishStation => "demolish-station",
            Verb::AddVehicle => "add-vehicle",
            Verb::ScrapVehicle => "scrap-vehicle",
            Verb::PlanRoute => "plan-route",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{verb}: missing argument `{argument}`")]
    MissingArgument {
        verb: &'static str,
        argument: &'static str,
    },

    #[error("{verb}: argument `{argument}` is not an integer: {token:?}")]
    InvalidNumber {
        verb: &'static str,
        argument: &'static str,
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("could not read commands")]
    Io(#[from] io::Error),
}

/// Reads commands from a stream of whitespace separated words.
/// Line breaks carry no meaning.
pub struct CommandReader<R> {
    reader: R,
    words: VecDeque<String>,
    line: String,
}

impl<R: BufRead> CommandReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            words: VecDeque::new(),
            line: String::new(),
        }
    }

    fn next_word(&mut self) -> io::Result<Option<String>> {
        while self.words.is_empty() {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.words
                .extend(self.line.split_whitespace().map(str::to_owned));
        }
        Ok(self.words.pop_front())
    }

    fn argument<T>(&mut self, verb: Verb, argument: &'static str) -> Result<T, CommandError>
    where
        T: std::str::FromStr<Err = ParseIntError>,
    {
        let verb = verb.name();
        let token = self
            .next_word()?
            .ok_or(CommandError::MissingArgument { verb, argument })?;
        token.parse().map_err(|source| CommandError::InvalidNumber {
            verb,
            argument,
            token,
            source,
        })
    }

    fn arguments(&mut self, verb: Verb) -> Result<Command, CommandError> {
        Ok(match verb {
            Verb::AddStation => {
                let distance = self.argument(verb, "distance")?;
                let count: usize = self.argument(verb, "count")?;
                let ranges = (0..count)
                    .map(|_| self.argument(verb, "range"))
                    .collect::<Result<_, _>>()?;
                Command::AddStation { distance, ranges }
            }
            Verb::DemolishStation => Command::DemolishStation {
                distance: self.argument(verb, "distance")?,
            },
            Verb::AddVehicle => Command::AddVehicle {
                distance: self.argument(verb, "distance")?,
                range: self.argument(verb, "range")?,
            },
            Verb::ScrapVehicle => Command::ScrapVehicle {
                distance: self.argument(verb, "distance")?,
                range: self.argument(verb, "range")?,
            },
            Verb::PlanRoute => Command::PlanRoute {
                source: self.argument(verb, "source")?,
                destination: self.argument(verb, "destination")?,
            },
        })
    }
}

impl<R: BufRead> Iterator for CommandReader<R> {
    type Item = Result<Command, CommandError>;

    fn next(&mut self) -> Option<Self::Item> {
        let word = match self.next_word() {
            Ok(Some(word)) => word,
            Ok(None) => return None,
            Err(err) => return Some(Err(err.into())),
        };
        Some(match Verb::parse(&word) {
            Some(verb) => self.arguments(verb),
            None => Ok(Command::Unknown(word)),
        })
    }
}
