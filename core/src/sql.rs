use crate::{
    col_metadata::part_column,
    err::{Error, Result},
};

/// A parsed query. The accepted dialect is deliberately tiny:
///
/// ```text
/// SELECT <* | col[, col]*> FROM <table> [WHERE <col> = <literal>]
/// ```
///
/// Keywords are case-insensitive, identifiers may be double-quoted, and
/// table identifiers may contain `/` to address nested category paths.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub columns: Projection,
    pub table: String,
    pub filter: Option<Filter>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    All,
    Columns(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Literal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Quoted(String),
    Star,
    Comma,
    Eq,
    Integer(i64),
    String(String),
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Ident(s) | Token::Quoted(s) => s.clone(),
            Token::Star => "*".to_string(),
            Token::Comma => ",".to_string(),
            Token::Eq => "=".to_string(),
            Token::Integer(n) => n.to_string(),
            Token::String(s) => format!("'{s}'"),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    // '/' joins category path segments, so it stays inside one identifier
    c.is_alphanumeric() || matches!(c, '_' | '/' | '-' | '.')
}

fn tokenize(sql: &str) -> Result<Vec<Token>> {
    let mut tokens = vec![];
    let mut chars = sql.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '=' => {
                chars.next();
                tokens.push(Token::Eq);
            }
            '\'' => {
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => value.push(c),
                        None => {
                            return Err(Error::Syntax("unterminated string literal".to_string()))
                        }
                    }
                }
                tokens.push(Token::String(value));
            }
            '"' => {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some(c) => name.push(c),
                        None => {
                            return Err(Error::Syntax("unterminated quoted identifier".to_string()))
                        }
                    }
                }
                tokens.push(Token::Quoted(name));
            }
            c if c.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() {
                        digits.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                // a trailing identifier character makes this an identifier,
                // not a number (e.g. a table named 0805)
                if chars.peek().copied().is_some_and(is_ident_char) {
                    while let Some(&c) = chars.peek() {
                        if is_ident_char(c) {
                            digits.push(c);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    tokens.push(Token::Ident(digits));
                } else {
                    let n = digits
                        .parse::<i64>()
                        .map_err(|e| Error::Syntax(format!("bad integer literal: {e}")))?;
                    tokens.push(Token::Integer(n));
                }
            }
            c if is_ident_char(c) => {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if is_ident_char(c) {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(name));
            }
            c => return Err(Error::Syntax(format!("unexpected character: {c}"))),
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn describe_next(&self) -> String {
        self.peek()
            .map(Token::describe)
            .unwrap_or_else(|| "end of input".to_string())
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        match self.peek() {
            Some(Token::Ident(word)) if word.eq_ignore_ascii_case(keyword) => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(Error::Syntax(format!(
                "{keyword} expected, got: {}",
                self.describe_next()
            ))),
        }
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek(), Some(Token::Ident(word)) if word.eq_ignore_ascii_case(keyword))
    }

    fn identifier(&mut self, what: &str) -> Result<String> {
        match self.next() {
            Some(Token::Ident(name)) | Some(Token::Quoted(name)) => Ok(name),
            token => Err(Error::Syntax(format!(
                "{what} expected, got: {}",
                token
                    .map(|t| t.describe())
                    .unwrap_or_else(|| "end of input".to_string())
            ))),
        }
    }

    fn projection(&mut self) -> Result<Projection> {
        if matches!(self.peek(), Some(Token::Star)) {
            self.pos += 1;
            return Ok(Projection::All);
        }
        let mut columns = vec![];
        loop {
            let name = match self.peek() {
                // only catalog columns are selectable, anything else reads as
                // a missing star
                Some(Token::Ident(name)) | Some(Token::Quoted(name))
                    if part_column(name).is_some() =>
                {
                    name.clone()
                }
                _ => {
                    return Err(Error::Syntax(format!(
                        "* expected, got: {}",
                        self.describe_next()
                    )))
                }
            };
            self.pos += 1;
            columns.push(name);
            if matches!(self.peek(), Some(Token::Comma)) {
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(Projection::Columns(columns))
    }

    fn literal(&mut self) -> Result<Literal> {
        match self.next() {
            Some(Token::Integer(n)) => Ok(Literal::Integer(n)),
            Some(Token::String(s)) => Ok(Literal::String(s)),
            token => Err(Error::Syntax(format!(
                "literal expected, got: {}",
                token
                    .map(|t| t.describe())
                    .unwrap_or_else(|| "end of input".to_string())
            ))),
        }
    }
}

pub fn parse_select(sql: &str) -> Result<SelectQuery> {
    let mut parser = Parser {
        tokens: tokenize(sql)?,
        pos: 0,
    };
    parser.expect_keyword("SELECT")?;
    let columns = parser.projection()?;
    parser.expect_keyword("FROM")?;
    let table = parser.identifier("table name")?;
    let filter = if parser.at_keyword("WHERE") {
        parser.pos += 1;
        let column = parser.identifier("filter column")?;
        match parser.next() {
            Some(Token::Eq) => {}
            token => {
                return Err(Error::Syntax(format!(
                    "= expected, got: {}",
                    token
                        .map(|t| t.describe())
                        .unwrap_or_else(|| "end of input".to_string())
                )))
            }
        }
        Some(Filter {
            column,
            value: parser.literal()?,
        })
    } else {
        None
    };
    if let Some(extra) = parser.peek() {
        return Err(Error::Syntax(format!(
            "unexpected input after query: {}",
            extra.describe()
        )));
    }
    Ok(SelectQuery {
        columns,
        table,
        filter,
    })
}
