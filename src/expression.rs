//! Arithmetic questions for the captcha

use std::fmt;

use serde::Serialize;

use crate::config::CaptchaConfig;
use crate::error::CaptchaError;
use crate::random::{RandomError, RandomSource};

/// Supported arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
        }
    }

    pub fn apply(self, a: i32, b: i32) -> i32 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Operators present in `symbols`, in `+`, `-` order; addition when none match
pub fn parse_operators(symbols: &str) -> Vec<Operator> {
    let mut operators = Vec::new();
    if symbols.contains('+') {
        operators.push(Operator::Add);
    }
    if symbols.contains('-') {
        operators.push(Operator::Subtract);
    }
    if operators.is_empty() {
        operators.push(Operator::Add);
    }
    operators
}

/// A generated question together with its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MathExpression {
    pub operand1: i32,
    pub operand2: i32,
    pub operator: Operator,
    pub answer: i32,
    /// Human-readable form, e.g. `"3 + 5 = ?"`
    pub question: String,
}

impl MathExpression {
    pub fn new(operand1: i32, operand2: i32, operator: Operator) -> Self {
        Self {
            operand1,
            operand2,
            operator,
            answer: operator.apply(operand1, operand2),
            question: format!("{} {} {} = ?", operand1, operator, operand2),
        }
    }
}

/// Draws random expressions with operands in `[math_min, math_max]`
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionGenerator {
    min_value: i32,
    max_value: i32,
    operators: Vec<Operator>,
}

impl ExpressionGenerator {
    pub fn new(config: &CaptchaConfig) -> Self {
        Self {
            min_value: config.math_min,
            max_value: config.math_max,
            operators: parse_operators(&config.math_operator),
        }
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Pick an operator, then draw the operands for it
    pub fn generate(&self, rng: &mut dyn RandomSource) -> Result<MathExpression, CaptchaError> {
        let index = rng
            .int_below(self.operators.len())
            .map_err(CaptchaError::ExpressionGeneration)?;

        match self.operators.get(index) {
            Some(Operator::Subtract) => self.generate_subtraction(rng),
            _ => self.generate_addition(rng),
        }
    }

    pub fn generate_addition(
        &self,
        rng: &mut dyn RandomSource,
    ) -> Result<MathExpression, CaptchaError> {
        let a = self.operand(rng)?;
        let b = self.operand(rng)?;
        Ok(MathExpression::new(a, b, Operator::Add))
    }

    /// Operands are ordered so the answer is never negative
    pub fn generate_subtraction(
        &self,
        rng: &mut dyn RandomSource,
    ) -> Result<MathExpression, CaptchaError> {
        let a = self.operand(rng)?;
        let b = self.operand(rng)?;
        Ok(MathExpression::new(a.max(b), a.min(b), Operator::Subtract))
    }

    fn operand(&self, rng: &mut dyn RandomSource) -> Result<i32, CaptchaError> {
        let span = i64::from(self.max_value) - i64::from(self.min_value) + 1;
        let upper = usize::try_from(span).map_err(|_| {
            CaptchaError::ExpressionGeneration(RandomError::EmptyRange { upper: 0 })
        })?;
        let offset = rng
            .int_below(upper)
            .map_err(CaptchaError::ExpressionGeneration)?;

        // offset < span, so the sum stays within [min_value, max_value]
        let value = i64::from(self.min_value) + offset as i64;
        i32::try_from(value)
            .map_err(|_| CaptchaError::ExpressionGeneration(RandomError::EmptyRange { upper }))
    }
}
