pub mod macros;
pub mod util;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Current line.
    line: usize,
    /// Current column.
    col: usize,
}

impl Position {
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn col(&self) -> usize {
        self.col
    }
}

/// Reading byte slice while keep the line and column.
#[derive(Debug)]
pub struct Scanner<'a> {
    /// The input bytes slice to be read.
    src: &'a [u8],
    /// Current position
    pos: Position,
    /// Current index.
    idx: usize,
}

impl<'a> Scanner<'a> {
    /// Create a `Scanner` from a byte slice.
    ///
    /// The `line` and `col` will always start from 1.
    pub const fn new(src: &'a [u8]) -> Self {
        Scanner {
            src,
            pos: Position { line: 1, col: 1 },
            idx: 0,
        }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    /// Byte offset of the next unread byte.
    pub fn offset(&self) -> usize {
        self.idx
    }

    /// Returns `true` if all bytes where read
    #[inline(always)]
    pub fn is_eof(&self) -> bool {
        self.idx >= self.src.len()
    }

    /// Get next byte without advance
    #[inline]
    pub fn peek(&self) -> Option<&u8> {
        self.src.get(self.idx)
    }

    #[inline]
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.src.get(self.idx..).is_some_and(|rem| rem.starts_with(pat))
    }

    /// `read_while()` will call the `func` closure for
    /// each element in the slice and advance
    /// while the closure returns `true`.
    ///
    /// # Returns
    ///
    /// A slice of bytes from the starting position to the position
    /// where the closure `func` returns `false` or the end of the slice
    /// is reached.
    #[inline(always)]
    pub fn read_while<F>(&mut self, func: F) -> &'a [u8]
    where
        F: Fn(u8) -> bool,
    {
        let start = self.idx;
        let src = self.src;
        let len = src.len();

        while self.idx < len && func(src[self.idx]) {
            self.bump(src[self.idx]);
        }

        &src[start..self.idx]
    }

    /// Same as [Scanner::read_while] but without advance.
    ///
    /// Also returns the byte that stopped the scan, if any.
    pub fn peek_while<F>(&self, func: F) -> (&'a [u8], Option<u8>)
    where
        F: Fn(u8) -> bool,
    {
        let src = &self.src[self.idx..];

        let n = src.iter().position(|&b| !func(b)).unwrap_or(src.len());
        let next_byte = src.get(n).copied();

        (&src[..n], next_byte)
    }

    /// Read `slice` if the next bytes are exactly equal to it.
    ///
    /// Nothing is consumed on mismatch.
    pub fn must_read_bytes(&mut self, slice: &[u8]) -> Result<()> {
        if !self.starts_with(slice) {
            return self.error(ErrorKind::Tag);
        }
        for &b in slice {
            self.bump(b);
        }
        Ok(())
    }

    /// Read next byte if equals to `b`.
    ///
    /// # Errors
    ///
    /// This method will return an error if the byte is not
    /// equal to `b`.
    ///
    /// If the slice reached the end, then an error will
    /// also be returned.
    pub fn must_read(&mut self, b: u8) -> Result<()> {
        let Some(&n) = self.peek() else {
            return self.error(ErrorKind::Eof);
        };
        if b != n {
            return self.error(ErrorKind::Char { expected: b, found: n });
        }
        self.next();
        Ok(())
    }

    /// Read number in the slice.
    ///
    /// This method read until an invalid digit is found.
    pub fn read_num<N>(&mut self) -> Result<N>
    where
        N: lexical_core::FromLexical,
    {
        match lexical_core::parse_partial::<N>(self.as_ref()) {
            Ok((value, readed)) if readed > 0 => {
                self.nth(readed - 1);
                Ok(value)
            }
            _ => self.error(ErrorKind::Num),
        }
    }

    /// Call the `func` closure for next byte and read it if
    /// the closure returns `true`.
    ///
    /// # Returns
    ///
    /// The byte readed.
    #[inline(always)]
    pub fn consume_if<F>(&mut self, func: F) -> Option<u8>
    where
        F: FnOnce(u8) -> bool,
    {
        match self.peek() {
            Some(&matched) if func(matched) => {
                self.bump(matched);
                Some(matched)
            }
            _ => None,
        }
    }

    #[inline(always)]
    fn bump(&mut self, byte: u8) {
        if byte == b'\n' {
            self.pos.col = 1;
            self.pos.line += 1;
        } else {
            self.pos.col += 1;
        }
        self.idx += 1;
    }

    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.src[self.idx..]
    }

    fn error<T>(&self, kind: ErrorKind) -> Result<T> {
        Err(Error {
            kind,
            line: self.pos.line,
            col: self.pos.col,
        })
    }
}

/// Errors that can occur while reading the src.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ErrorKind {
    /// End of file reached.
    Eof,
    Char {
        expected: u8,
        found: u8,
    },
    Num,
    Tag,
}

#[derive(Debug, PartialEq)]
pub struct Error {
    pub kind: ErrorKind,
    pub line: usize,
    pub col: usize,
}

impl AsRef<[u8]> for Scanner<'_> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.remaining()
    }
}

impl Iterator for Scanner<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        self.src.get(self.idx).copied().inspect(|&byte| self.bump(byte))
    }
}
