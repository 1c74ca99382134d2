//! Core lexical analyzer for sort expressions
//!
//! Single left-to-right scan producing a [`TokenStream`]. Names are resolved
//! through the alias table and checked against the resist snapshot while
//! scanning, so later stages only ever see canonical stat names.

use crate::config::compile_time::expression::MAX_OPERATOR_COUNT;
use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::grammar::{aliases, classify_field, lookup_macro, FieldKind};
use crate::logging::codes;
use crate::symbols::ResistNameSet;
use crate::tokens::{Operator, Token, TokenStream};
use crate::utils::{Location, Span};
use crate::{log_debug, log_success};
use std::collections::HashMap;

/// Lexical analysis errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexerError {
    #[error("Invalid character '{character}'{location}")]
    InvalidCharacter { character: char, location: Location },

    #[error("'{text}' is not a valid number{location}")]
    InvalidNumber { text: String, location: Location },

    #[error(
        "{text} is out of range, numbers must be between {} and {}{location}",
        MIN_LITERAL,
        MAX_LITERAL
    )]
    NumberOutOfRange { text: String, location: Location },

    #[error(
        "'{text}' is too long, names and numbers are limited to {} characters{location}",
        MAX_OPERAND_LENGTH
    )]
    OperandTooLong { text: String, location: Location },

    #[error(
        "Too many operators: sort expressions may use at most {} (mpm and bpd count as 3)",
        MAX_OPERATOR_COUNT
    )]
    TooManyOperators { count: usize },

    #[error("Unknown stat '{name}'{location}")]
    UnknownResist { name: String, location: Location },

    #[error("Sort expressions cannot only contain constant values")]
    ConstantsOnly,

    #[error("Sort expressions are limited to {limit} characters, this one has {length}")]
    ExpressionTooLong { length: usize, limit: usize },

    #[error("Compressed expression contains non-canonical name '{name}'")]
    NonCanonicalOperand { name: String },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::InvalidCharacter { .. } => codes::lexical::INVALID_CHARACTER,
            LexerError::InvalidNumber { .. } => codes::lexical::INVALID_NUMBER,
            LexerError::NumberOutOfRange { .. } => codes::lexical::NUMBER_OUT_OF_RANGE,
            LexerError::OperandTooLong { .. } => codes::lexical::OPERAND_TOO_LONG,
            LexerError::TooManyOperators { .. } => codes::lexical::TOO_MANY_OPERATORS,
            LexerError::UnknownResist { .. } => codes::lexical::UNKNOWN_RESIST,
            LexerError::ConstantsOnly => codes::lexical::CONSTANTS_ONLY,
            LexerError::ExpressionTooLong { .. } => codes::lexical::EXPRESSION_TOO_LONG,
            LexerError::NonCanonicalOperand { .. } => codes::lexical::NON_CANONICAL_OPERAND,
        }
    }

    /// Source location, when positions were recorded
    pub fn span(&self) -> Option<Span> {
        match self {
            LexerError::InvalidCharacter { location, .. }
            | LexerError::InvalidNumber { location, .. }
            | LexerError::NumberOutOfRange { location, .. }
            | LexerError::OperandTooLong { location, .. }
            | LexerError::UnknownResist { location, .. } => location.span(),
            _ => None,
        }
    }
}

/// How operand names are interpreted
#[derive(Debug, Clone, Copy)]
pub enum NameMode<'r> {
    /// User input: resolve aliases and validate resists against the snapshot
    Resolve(&'r ResistNameSet),
    /// Compressed records: names are already canonical and were validated
    /// when the record was produced
    Canonical,
}

/// Lexical analysis metrics
#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub operand_tokens: usize,
    pub number_tokens: usize,
    pub operator_tokens: usize,
    pub bracket_tokens: usize,
    pub macro_expansions: usize,
    pub aliases_resolved: usize,
    pub operator_usage_patterns: HashMap<char, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        match token {
            Token::Operand(_) => self.operand_tokens += 1,
            Token::Number(_) => self.number_tokens += 1,
            Token::OpenBracket | Token::CloseBracket => self.bracket_tokens += 1,
            Token::Operator(op) => {
                self.operator_tokens += 1;

                if preferences.track_operator_patterns {
                    *self.operator_usage_patterns.entry(op.symbol()).or_insert(0) += 1;
                }
            }
        }
    }
}

/// Core lexical analyzer
pub struct LexicalAnalyzer<'r> {
    mode: NameMode<'r>,
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl<'r> LexicalAnalyzer<'r> {
    /// Analyzer for user input validated against `resists`
    pub fn new(resists: &'r ResistNameSet) -> Self {
        Self::with_mode(NameMode::Resolve(resists))
    }

    /// Analyzer for canonical compressed expressions
    pub fn canonical() -> Self {
        Self::with_mode(NameMode::Canonical)
    }

    pub fn with_mode(mode: NameMode<'r>) -> Self {
        Self {
            mode,
            metrics: LexicalMetrics::default(),
            preferences: LexicalPreferences::default(),
        }
    }

    pub fn with_preferences(mut self, preferences: LexicalPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    fn location(&self, span: Span) -> Location {
        if self.preferences.include_position_in_errors {
            Location(Some(span))
        } else {
            Location::none()
        }
    }

    /// Tokenize one expression
    pub fn tokenize(&mut self, input: &str) -> Result<TokenStream, LexerError> {
        self.metrics = LexicalMetrics::default();

        let result = self.scan(input);

        match &result {
            Ok(stream) => {
                log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization completed",
                    "tokens" => stream.len(),
                    "operators" => stream.operator_count(),
                    "macros" => self.metrics.macro_expansions
                );
            }
            Err(error) => {
                log_debug!(code = error.error_code(), "Expression rejected by lexer",
                    "reason" => error
                );
            }
        }

        result
    }

    fn scan(&mut self, input: &str) -> Result<TokenStream, LexerError> {
        let chars: Vec<char> = input.chars().collect();
        let mut stream = TokenStream::new();
        let mut index = 0;

        while index < chars.len() {
            let ch = chars[index];

            if ch.is_ascii_whitespace() {
                index += 1;
                continue;
            }

            if ch.is_ascii_alphabetic() || ch == '?' {
                let end = scan_while(&chars, index, |c| {
                    c.is_ascii_alphabetic() || c == ' ' || c == '?'
                });
                self.read_name(&chars[index..end], index, &mut stream)?;
                index = end;
                continue;
            }

            if ch.is_ascii_digit() || ch == '.' {
                let end = scan_while(&chars, index, |c| c.is_ascii_digit() || c == '.');
                let text: String = chars[index..end].iter().collect();
                let token = self.read_number(&text, Span::from_offsets(index, end))?;
                self.push(&mut stream, token, Span::from_offsets(index, end));
                index = end;
                continue;
            }

            let span = Span::single(index);
            let token = match ch {
                '(' => Token::OpenBracket,
                ')' => Token::CloseBracket,
                _ => match Operator::from_char(ch) {
                    Some(op) => Token::Operator(op),
                    None => {
                        return Err(LexerError::InvalidCharacter {
                            character: ch,
                            location: self.location(span),
                        })
                    }
                },
            };
            self.push(&mut stream, token, span);
            check_operator_budget(&stream)?;
            index += 1;
        }

        if !stream.is_empty() && stream.operand_count() == 0 {
            return Err(LexerError::ConstantsOnly);
        }

        Ok(stream)
    }

    fn push(&mut self, stream: &mut TokenStream, token: Token, span: Span) {
        self.metrics.record_token(&token, &self.preferences);
        stream.push(token, span);
    }

    fn read_number(&self, text: &str, span: Span) -> Result<Token, LexerError> {
        if text.chars().count() > MAX_OPERAND_LENGTH {
            return Err(LexerError::OperandTooLong {
                text: text.to_string(),
                location: self.location(span),
            });
        }

        let value: f64 = text.parse().map_err(|_| LexerError::InvalidNumber {
            text: text.to_string(),
            location: self.location(span),
        })?;

        if !(MIN_LITERAL..=MAX_LITERAL).contains(&value) {
            return Err(LexerError::NumberOutOfRange {
                text: text.to_string(),
                location: self.location(span),
            });
        }

        Ok(Token::Number(value))
    }

    fn read_name(
        &mut self,
        run: &[char],
        start: usize,
        stream: &mut TokenStream,
    ) -> Result<(), LexerError> {
        // Trim the run and collapse inner whitespace, keeping the span on the text
        let leading = run.iter().take_while(|c| **c == ' ').count();
        let trailing = run.iter().rev().take_while(|c| **c == ' ').count();
        let span = Span::from_offsets(start + leading, start + run.len() - trailing);
        let raw: String = run[leading..run.len() - trailing].iter().collect();
        let written = raw.split_whitespace().collect::<Vec<_>>().join(" ");

        if written.chars().count() > MAX_OPERAND_LENGTH {
            return Err(LexerError::OperandTooLong {
                text: written,
                location: self.location(span),
            });
        }

        let lowered = written.to_lowercase();
        let name = match self.mode {
            NameMode::Resolve(_) => {
                let resolved = aliases::unalias_bonus_name(&lowered);
                if resolved != lowered {
                    self.metrics.aliases_resolved += 1;
                }
                resolved
            }
            NameMode::Canonical => {
                if lowered != written || !aliases::is_canonical(&written) {
                    return Err(LexerError::NonCanonicalOperand { name: written });
                }
                written.clone()
            }
        };

        if let Some(definition) = lookup_macro(&name) {
            let expansion = definition.expand();
            for token in &expansion {
                self.metrics.record_token(token, &self.preferences);
            }
            self.metrics.macro_expansions += 1;
            stream.push_expansion(&expansion, span, definition.name);
            return check_operator_budget(stream);
        }

        if let NameMode::Resolve(resists) = self.mode {
            if classify_field(&name) == FieldKind::Resist && !resists.contains(&name) {
                return Err(LexerError::UnknownResist {
                    name: written,
                    location: self.location(span),
                });
            }
        }

        self.push(stream, Token::Operand(name), span);
        Ok(())
    }
}

fn scan_while(chars: &[char], start: usize, accept: impl Fn(char) -> bool) -> usize {
    chars[start..]
        .iter()
        .position(|c| !accept(*c))
        .map_or(chars.len(), |offset| start + offset)
}

fn check_operator_budget(stream: &TokenStream) -> Result<(), LexerError> {
    if stream.operator_count() > MAX_OPERATOR_COUNT {
        return Err(LexerError::TooManyOperators {
            count: stream.operator_count(),
        });
    }
    Ok(())
}
