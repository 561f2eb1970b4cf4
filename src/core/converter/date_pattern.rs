use chrono::{Datelike, NaiveDate};

/// Two-digit years are read as 2000..=2099.
const TWO_DIGIT_YEAR_BASE: i32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    Month,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Number {
        field: Field,
        min_digits: usize,
        max_digits: usize,
    },
    Literal(char),
}

/// A date template such as `d/M/yyyy`.
///
/// Letters: `yyyy` four-digit year, `yy` two-digit year, `M`/`d` one or two
/// digits, `MM`/`dd` exactly two digits. Any other character must appear
/// verbatim in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    pattern: String,
    tokens: Vec<Token>,
    two_digit_year: bool,
}

impl DatePattern {
    pub fn compile(pattern: &str) -> Option<Self> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut tokens = Vec::new();
        let mut two_digit_year = false;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let run = chars[i..].iter().take_while(|&&x| x == c).count();

            let token = match (c, run) {
                ('y', 4) => Token::Number {
                    field: Field::Year,
                    min_digits: 4,
                    max_digits: 4,
                },
                ('y', 2) => {
                    two_digit_year = true;
                    Token::Number {
                        field: Field::Year,
                        min_digits: 2,
                        max_digits: 2,
                    }
                }
                ('M', 1) | ('d', 1) | ('M', 2) | ('d', 2) => Token::Number {
                    field: if c == 'M' { Field::Month } else { Field::Day },
                    min_digits: run,
                    max_digits: 2,
                },
                ('y', _) | ('M', _) | ('d', _) => return None,
                _ => {
                    tokens.extend(std::iter::repeat(Token::Literal(c)).take(run));
                    i += run;
                    continue;
                }
            };
            tokens.push(token);
            i += run;
        }

        Some(Self {
            pattern: pattern.to_string(),
            tokens,
            two_digit_year,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Parses the whole of `input`, or returns `None`.
    ///
    /// A day past the end of its month (up to 31) resolves to the last day of
    /// that month, so `2021-2-30` reads as 28 February.
    pub fn parse(&self, input: &str) -> Option<NaiveDate> {
        let bytes = input.as_bytes();
        let mut pos = 0;
        let (mut year, mut month, mut day) = (None, None, None);

        for token in &self.tokens {
            match *token {
                Token::Literal(expected) => {
                    let actual = input[pos..].chars().next()?;
                    if actual != expected {
                        return None;
                    }
                    pos += actual.len_utf8();
                }
                Token::Number {
                    field,
                    min_digits,
                    max_digits,
                } => {
                    let digits = bytes[pos..]
                        .iter()
                        .take(max_digits)
                        .take_while(|b| b.is_ascii_digit())
                        .count();
                    if digits < min_digits {
                        return None;
                    }
                    let value: u32 = input[pos..pos + digits].parse().ok()?;
                    pos += digits;
                    match field {
                        Field::Year => year = Some(value),
                        Field::Month => month = Some(value),
                        Field::Day => day = Some(value),
                    }
                }
            }
        }

        if pos != input.len() {
            return None;
        }

        let year = match year? {
            y if self.two_digit_year => TWO_DIGIT_YEAR_BASE + y as i32,
            0 => return None,
            y => y as i32,
        };
        let month = month?;
        let day = day?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }

        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        NaiveDate::from_ymd_opt(year, month, day.min(days_in_month(first)))
    }
}

fn days_in_month(first: NaiveDate) -> u32 {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next.map(|n| n.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31)
}
