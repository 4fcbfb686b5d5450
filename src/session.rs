use std::io::{self, BufRead, Write};

use log::{debug, error, warn};

use crate::{
    command::{Command, CommandError, CommandReader},
    highway::{Highway, HighwayError},
    reply::{Reply, Vocabulary},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Commands that produced a reply.
    pub executed: usize,
    /// Words that named no command.
    pub skipped: usize,
    /// Whether malformed input ended the session.
    pub aborted: bool,
}

/// Executes commands against a `Highway` and writes one reply line per command.
pub struct Session<W> {
    highway: Highway,
    vocabulary: Vocabulary,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(highway: Highway, vocabulary: Vocabulary, out: W) -> Self {
        Self {
            highway,
            vocabulary,
            out,
        }
    }

    pub fn highway(&self) -> &Highway {
        &self.highway
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Applies one command. Unknown words yield no reply.
    pub fn execute(&mut self, command: Command) -> Option<Reply> {
        let reply = match command {
            Command::AddStation { distance, ranges } => {
                match self.highway.add_station(distance, &ranges) {
                    Ok(()) => Reply::Added,
                    Err(err) => rejected(err, Reply::NotAdded),
                }
            }
            Command::DemolishStation { distance } => {
                match self.highway.demolish_station(distance) {
                    Ok(()) => Reply::Demolished,
                    Err(err) => rejected(err, Reply::NotDemolished),
                }
            }
            Command::AddVehicle { distance, range } => {
                match self.highway.add_vehicle(distance, range) {
                    Ok(()) => Reply::Added,
                    Err(err) => rejected(err, Reply::NotAdded),
                }
            }
            Command::ScrapVehicle { distance, range } => {
                match self.highway.scrap_vehicle(distance, range) {
                    Ok(()) => Reply::Scrapped,
                    Err(err) => rejected(err, Reply::NotScrapped),
                }
            }
            Command::PlanRoute {
                source,
                destination,
            } => match self.highway.plan_route(source, destination) {
                Ok(route) => Reply::Route(route),
                Err(err) => {
                    debug!("{}", err);
                    Reply::NoRoute
                }
            },
            Command::Unknown(word) => {
                warn!("Skipping unknown command {:?}", word);
                return None;
            }
        };
        Some(reply)
    }

    fn write_reply(&mut self, reply: &Reply) -> io::Result<()> {
        writeln!(self.out, "{}", self.vocabulary.render(reply))
    }

    /// Runs every command from `commands`, stopping at the first malformed one.
    pub fn run<R: BufRead>(&mut self, commands: CommandReader<R>) -> io::Result<Summary> {
        let mut summary = Summary::default();
        for command in commands {
            let command = match command {
                Ok(command) => command,
                Err(CommandError::Io(err)) => return Err(err),
                Err(err) => {
                    error!("Stopping at malformed input: {}", err);
                    self.write_reply(&Reply::InputError)?;
                    summary.aborted = true;
                    break;
                }
            };
            match self.execute(command) {
                Some(reply) => {
                    self.write_reply(&reply)?;
                    summary.executed += 1;
                }
                None => summary.skipped += 1,
            }
        }
        self.out.flush()?;
        Ok(summary)
    }
}

fn rejected(err: HighwayError, reply: Reply) -> Reply {
    debug!("{}", err);
    reply
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::fleet::FleetCapacity;

    fn run(input: &str, vocabulary: Vocabulary) -> (String, Summary) {
        let mut session = Session::new(Highway::default(), vocabulary, Vec::new());
        let summary = session
            .run(CommandReader::new(Cursor::new(input.as_bytes())))
            .unwrap();
        (String::from_utf8(session.into_output()).unwrap(), summary)
    }

    #[test]
    fn replies_line_by_line() {
        let input = "\
            add-station 0 1 200\n\
            add-station 200 1 200\n\
            add-station 400 1 200\n\
            add-station 200 0\n\
            plan-route 0 400\n\
            plan-route 400 0\n\
            plan-route 200 200\n\
            scrap-vehicle 200 200\n\
            scrap-vehicle 200 200\n\
            plan-route 0 400\n\
            add-vehicle 200 300\n\
            add-vehicle 300 300\n\
            demolish-station 400\n\
            demolish-station 400\n\
            plan-route 0 400\n";
        let (output, summary) = run(input, Vocabulary::English);
        assert_eq!(
            output,
            "added\nadded\nadded\nnot added\n\
             0 200 400\n400 200 0\n200\n\
             scrapped\nnot scrapped\nno route\n\
             added\nnot added\n\
             demolished\nnot demolished\nno route\n"
        );
        assert_eq!(
            summary,
            Summary {
                executed: 15,
                skipped: 0,
                aborted: false
            }
        );
    }

    #[test]
    fn italian_protocol() {
        let input = "aggiungi-stazione 10 2 5 30\n\
                     aggiungi-stazione 40 0\n\
                     pianifica-percorso 10 40\n\
                     rottama-auto 10 30\n\
                     rottama-auto 10 30\n\
                     pianifica-percorso 10 40\n\
                     demolisci-stazione 10\n\
                     aggiungi-auto 10 1\n";
        let (output, _) = run(input, Vocabulary::Italian);
        assert_eq!(
            output,
            "aggiunta\naggiunta\n10 40\nrottamata\nnon rottamata\nnessun percorso\n\
             demolita\nnon aggiunta\n"
        );
    }

    #[test]
    fn malformed_input_stops_the_session() {
        let (output, summary) = run(
            "add-station 1 0\nadd-vehicle 1 fast\nadd-station 2 0\n",
            Vocabulary::English,
        );
        assert_eq!(output, "added\ninput error\n");
        assert!(summary.aborted);
        assert_eq!(summary.executed, 1);
    }

    #[test]
    fn unknown_words_are_skipped() {
        let (output, summary) = run("hello add-station 1 0 world", Vocabulary::English);
        assert_eq!(output, "added\n");
        assert_eq!(summary.skipped, 2);
    }

    #[test]
    fn full_fleet_is_not_added() {
        let mut session = Session::new(
            Highway::new(FleetCapacity::Bounded(1)),
            Vocabulary::English,
            Vec::new(),
        );
        let reply = session.execute(Command::AddStation {
            distance: 5,
            ranges: vec![1, 2],
        });
        assert_eq!(reply, Some(Reply::NotAdded));
        assert!(session.highway().stations().is_empty());
        assert_eq!(
            session.execute(Command::AddStation {
                distance: 5,
                ranges: vec![1],
            }),
            Some(Reply::Added)
        );
        assert_eq!(
            session.execute(Command::AddVehicle {
                distance: 5,
                range: 2,
            }),
            Some(Reply::NotAdded)
        );
    }
}
