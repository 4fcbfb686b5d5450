use std::fmt::Display;

use clap::ValueEnum;

use crate::planner::Route;

/// The words used for replies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Vocabulary {
    #[default]
    English,
    /// Italian replies, as spoken by the legacy tooling.
    Italian,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Added,
    NotAdded,
    Demolished,
    NotDemolished,
    Scrapped,
    NotScrapped,
    Route(Route),
    NoRoute,
    InputError,
}

impl Vocabulary {
    fn word(self, reply: &Reply) -> &'static str {
        use Reply::*;
        match (self, reply) {
            (Vocabulary::English, Added) => "added",
            (Vocabulary::English, NotAdded) => "not added",
            (Vocabulary::English, Demolished) => "demolished",
            (Vocabulary::English, NotDemolished) => "not demolished",
            (Vocabulary::English, Scrapped) => "scrapped",
            (Vocabulary::English, NotScrapped) => "not scrapped",
            (Vocabulary::English, NoRoute) => "no route",
            (Vocabulary::English, InputError) => "input error",
            (Vocabulary::Italian, Added) => "aggiunta",
            (Vocabulary::Italian, NotAdded) => "non aggiunta",
            (Vocabulary::Italian, Demolished) => "demolita",
            (Vocabulary::Italian, NotDemolished) => "non demolita",
            (Vocabulary::Italian, Scrapped) => "rottamata",
            (Vocabulary::Italian, NotScrapped) => "non rottamata",
            (Vocabulary::Italian, NoRoute) => "nessun percorso",
            (Vocabulary::Italian, InputError) => "Errore di input",
            (_, Route(_)) => "",
        }
    }

    /// Formats `reply` as a single line, without the line terminator.
    pub fn render(self, reply: &Reply) -> Rendered<'_> {
        Rendered {
            vocabulary: self,
            reply,
        }
    }
}

pub struct Rendered<'a> {
    vocabulary: Vocabulary,
    reply: &'a Reply,
}

impl Display for Rendered<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reply {
            Reply::Route(route) => Display::fmt(route, f),
            reply => f.write_str(self.vocabulary.word(reply)),
        }
    }
}
