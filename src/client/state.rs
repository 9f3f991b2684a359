//! Client state management.

use crate::models::QuizQuestion;
use crate::protocol::ClientMessage;
use crate::quiz::{ScoringResult, Submission};

/// Current state of the client.
#[derive(Debug, Clone, Default)]
pub enum ClientState {
    /// Connecting to server.
    #[default]
    Connecting,

    /// Waiting for the server to answer a request.
    Waiting { message: String },

    /// Answering quiz questions.
    Quiz {
        questions: Vec<QuizQuestion>,
        current_index: usize,
        selected_option: usize,
        answers: Vec<usize>,
    },

    /// Viewing the scored answers.
    Results { result: ScoringResult, scroll: usize },

    /// The server refused the last request. The connection is still open.
    Failed { message: String },

    /// Connection lost.
    Disconnected { message: String },
}

/// Client application state.
pub struct ClientApp {
    /// Current state.
    pub state: ClientState,
    /// Server host.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Language the quiz is for.
    pub language: String,
    /// Whether the client should quit.
    pub should_quit: bool,
}

impl ClientApp {
    /// Create a new client app.
    pub fn new(host: String, port: u16, language: String) -> Self {
        Self {
            state: ClientState::Connecting,
            host,
            port,
            language,
            should_quit: false,
        }
    }

    /// Get the server address string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Request for a new quiz round; moves to the waiting state.
    pub fn request_quiz(&mut self) -> ClientMessage {
        self.state = ClientState::Waiting {
            message: format!("Loading {} quiz...", self.language),
        };
        ClientMessage::GetQuiz {
            language: self.language.clone(),
        }
    }

    /// Start answering the given questions.
    pub fn enter_quiz(&mut self, language: String, questions: Vec<QuizQuestion>) {
        if questions.is_empty() {
            self.state = ClientState::Failed {
                message: format!("No questions available for {}", language),
            };
            return;
        }

        self.language = language;
        self.state = ClientState::Quiz {
            answers: Vec::with_capacity(questions.len()),
            questions,
            current_index: 0,
            selected_option: 0,
        };
    }

    /// The question currently shown, if answering.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if let ClientState::Quiz {
            questions,
            current_index,
            ..
        } = &self.state
        {
            questions.get(*current_index)
        } else {
            None
        }
    }

    /// Select next option in quiz.
    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if let ClientState::Quiz {
            selected_option, ..
        } = &mut self.state
        {
            if count > 0 {
                *selected_option = (*selected_option + 1) % count;
            }
        }
    }

    /// Select previous option in quiz.
    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if let ClientState::Quiz {
            selected_option, ..
        } = &mut self.state
        {
            if count > 0 {
                *selected_option = (*selected_option + count - 1) % count;
            }
        }
    }

    /// Get current selected option.
    pub fn selected_option(&self) -> usize {
        if let ClientState::Quiz {
            selected_option, ..
        } = &self.state
        {
            *selected_option
        } else {
            0
        }
    }

    fn option_count(&self) -> usize {
        self.current_question().map_or(0, |q| q.options.len())
    }

    /// Record the selected option and advance.
    ///
    /// Returns the check request once every question has an answer.
    pub fn submit_answer(&mut self) -> Option<ClientMessage> {
        let ClientState::Quiz {
            questions,
            current_index,
            selected_option,
            answers,
        } = &mut self.state
        else {
            return None;
        };

        answers.push(*selected_option);
        *current_index += 1;
        *selected_option = 0;

        if *current_index < questions.len() {
            return None;
        }

        let submission: Submission = questions
            .iter()
            .zip(answers.iter())
            .map(|(question, answer)| (question.question_id, *answer as i64))
            .collect();

        self.state = ClientState::Waiting {
            message: "Checking answers...".to_string(),
        };

        Some(ClientMessage::CheckAnswers {
            language: self.language.clone(),
            answers: submission,
        })
    }

    /// Move to results state.
    pub fn enter_results(&mut self, result: ScoringResult) {
        self.state = ClientState::Results { result, scroll: 0 };
    }

    /// Show an error reported by the server.
    pub fn fail(&mut self, message: String, available_languages: &[String]) {
        let message = if available_languages.is_empty() {
            message
        } else {
            format!("{}\n\nTry one of: {}", message, available_languages.join(", "))
        };
        self.state = ClientState::Failed { message };
    }

    /// Move to disconnected state.
    pub fn disconnect(&mut self, message: String) {
        self.state = ClientState::Disconnected { message };
    }

    /// Scroll results down.
    pub fn scroll_results_down(&mut self) {
        if let ClientState::Results { scroll, result } = &mut self.state {
            let max_scroll = result.results.len().saturating_sub(1);
            *scroll = (*scroll + 1).min(max_scroll);
        }
    }

    /// Scroll results up.
    pub fn scroll_results_up(&mut self) {
        if let ClientState::Results { scroll, .. } = &mut self.state {
            *scroll = scroll.saturating_sub(1);
        }
    }
}
