//! Interactive session loop
//!
//! A small state machine: show the menu, read a selection, gather the
//! arguments for that query, run it against the model, print, repeat.
//! End of input at any prompt ends the session.

use std::io::{BufRead, Write};

use crate::config::{InvalidSelectionPolicy, SessionConfig};
use crate::error::ExplorerResult;
use crate::gateway::EmbeddingModel;
use crate::menu::{MenuChoice, MAIN_MENU};
use crate::report::{format_neighbors, print_failure, print_query};

/// Ends the odd-one-out list (from the second entry on)
pub const STOP_WORD: &str = "stop";

const ODD_ONE_OUT_INTRO: &str = "This option lets you find the odd one out of a list. \
Enter 'stop' at any number (but the First one) when you want to end the list. \n\
Please enter the first term you want to add to the list : ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    MenuPrompt,
    Dispatch(MenuChoice),
    Terminated,
}

/// A fully read query, ready to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    PairSimilarity { first: String, second: String },
    MostSimilar { term: String, top_n: usize },
    Analogy { first: String, second: String, third: String },
    OddOneOut { terms: Vec<String> },
}

impl Query {
    /// One-line description printed above the result
    pub fn description(&self) -> String {
        match self {
            Self::PairSimilarity { first, second } => {
                format!("Similarity between : {first} & {second}")
            }
            Self::MostSimilar { term, top_n } => {
                format!("Top {top_n} most similar terms to : {term}")
            }
            Self::Analogy {
                first,
                second,
                third,
            } => format!("{first} - {second} + {third} = "),
            Self::OddOneOut { terms } => format!(
                "Here is the odd term out of the provided list which goes as this : {}",
                terms.join(", ")
            ),
        }
    }
}

pub struct Session<'m, R, W> {
    model: &'m EmbeddingModel,
    input: R,
    output: W,
    config: SessionConfig,
}

impl<'m, R: BufRead, W: Write> Session<'m, R, W> {
    pub fn new(model: &'m EmbeddingModel, input: R, output: W, config: SessionConfig) -> Self {
        Self {
            model,
            input,
            output,
            config,
        }
    }

    /// Drive the loop until the user ends it or input runs out
    pub fn run(&mut self) -> ExplorerResult<()> {
        let mut state = SessionState::MenuPrompt;
        while state != SessionState::Terminated {
            state = self.step(state)?;
        }
        tracing::info!("Session ended");
        Ok(())
    }

    /// Advance the state machine by one transition
    pub fn step(&mut self, state: SessionState) -> ExplorerResult<SessionState> {
        let next = match state {
            SessionState::MenuPrompt => self.menu_prompt()?,
            SessionState::Dispatch(choice) => match self.read_query(choice)? {
                Some(query) => {
                    self.execute(&query)?;
                    SessionState::MenuPrompt
                }
                None => SessionState::Terminated,
            },
            SessionState::Terminated => SessionState::Terminated,
        };
        tracing::trace!(?state, ?next, "transition");
        Ok(next)
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn menu_prompt(&mut self) -> ExplorerResult<SessionState> {
        let Some(line) = self.prompt(MAIN_MENU)? else {
            return Ok(SessionState::Terminated);
        };

        match MenuChoice::parse(&line) {
            Some(MenuChoice::End) => Ok(SessionState::Terminated),
            Some(choice) => Ok(SessionState::Dispatch(choice)),
            None => {
                tracing::debug!("Invalid menu selection: {:?}", line);
                let next = match self.config.invalid_selection {
                    InvalidSelectionPolicy::Terminate => {
                        writeln!(
                            self.output,
                            "You entered a number that was not in the menu. -_-. \
                             #1 to #4 only. Please start the program again."
                        )?;
                        SessionState::Terminated
                    }
                    InvalidSelectionPolicy::Reprompt => {
                        writeln!(
                            self.output,
                            "You entered a number that was not in the menu. -_-. \
                             #1 to #4 only. Please try again."
                        )?;
                        SessionState::MenuPrompt
                    }
                };
                Ok(next)
            }
        }
    }

    /// Prompt for the arguments of `choice`. `None` on end of input.
    pub fn read_query(&mut self, choice: MenuChoice) -> ExplorerResult<Option<Query>> {
        let query = match choice {
            MenuChoice::Similarity => {
                let Some(first) = self.prompt_lower("Enter the first term : ")? else {
                    return Ok(None);
                };
                let Some(second) = self.prompt_lower("Enter the second term : ")? else {
                    return Ok(None);
                };
                Query::PairSimilarity { first, second }
            }
            MenuChoice::MostSimilar => {
                let Some(term) = self.prompt_lower("Which term do you want to check: ")? else {
                    return Ok(None);
                };
                let Some(top_n) = self.prompt_count("Top n most similar terms... n = ")? else {
                    return Ok(None);
                };
                Query::MostSimilar { term, top_n }
            }
            MenuChoice::Analogy => {
                writeln!(
                    self.output,
                    "For now, operations are Term1 - Term2 + Term3. "
                )?;
                let Some(first) = self.prompt("Term 1 : ")? else {
                    return Ok(None);
                };
                let Some(second) = self.prompt("- Term 2 : ")? else {
                    return Ok(None);
                };
                let Some(third) = self.prompt("+ Term 3 : ")? else {
                    return Ok(None);
                };
                Query::Analogy {
                    first,
                    second,
                    third,
                }
            }
            MenuChoice::OddOneOut => {
                let Some(first) = self.prompt(ODD_ONE_OUT_INTRO)? else {
                    return Ok(None);
                };
                let mut terms = vec![first];
                loop {
                    let label = format!("Term #{} : ", terms.len() + 1);
                    let Some(entry) = self.prompt(&label)? else {
                        return Ok(None);
                    };
                    if entry.eq_ignore_ascii_case(STOP_WORD) {
                        break;
                    }
                    terms.push(entry);
                }
                Query::OddOneOut { terms }
            }
            MenuChoice::End => return Ok(None),
        };
        Ok(Some(query))
    }

    /// Run a query and print its result or the failure notice
    pub fn execute(&mut self, query: &Query) -> ExplorerResult<()> {
        tracing::debug!(?query, "running query");
        let model = self.model;

        let outcome = match query {
            Query::PairSimilarity { first, second } => model
                .pair_similarity(first, second)
                .map(|score| score.to_string()),
            Query::MostSimilar { term, top_n } => model
                .most_similar(term, *top_n)
                .map(|hits| format_neighbors(&hits)),
            Query::Analogy {
                first,
                second,
                third,
            } => model
                .vector_analogy(first, second, third)
                .map(|hits| format_neighbors(&hits)),
            Query::OddOneOut { terms } => model
                .odd_one_out(terms.as_slice())
                .map(|odd| format!("--> {odd}")),
        };

        match outcome {
            Ok(result) => print_query(&mut self.output, &query.description(), &result)?,
            Err(err) => {
                tracing::debug!("Query failed: {}", err);
                let single_term = match query {
                    Query::MostSimilar { term, .. } => Some(term.as_str()),
                    _ => None,
                };
                print_failure(&mut self.output, &err, single_term)?;
            }
        }
        Ok(())
    }

    /// Show `text`, read one line. `None` on end of input.
    fn prompt(&mut self, text: &str) -> ExplorerResult<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_lower(&mut self, text: &str) -> ExplorerResult<Option<String>> {
        Ok(self.prompt(text)?.map(|term| term.to_lowercase()))
    }

    /// Re-prompt until a positive whole number is entered
    fn prompt_count(&mut self, text: &str) -> ExplorerResult<Option<usize>> {
        loop {
            let Some(line) = self.prompt(text)? else {
                return Ok(None);
            };
            match line.parse::<usize>() {
                Ok(n) if n > 0 => return Ok(Some(n)),
                _ => writeln!(self.output, "Please enter a whole number greater than 0.")?,
            }
        }
    }
}
