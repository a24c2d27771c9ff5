//! SOA record text handling.
//!
//! Designate renders the apex SOA value as
//! `mname rname serial refresh retry expire minimum`. Some derivative
//! deployments (OTC among them) wrap the numeric block in parentheses
//! instead: `mname rname (serial refresh retry expire minimum)`. The
//! reconciler must write and compare SOA text in whichever style the
//! target actually speaks, so parsing is tolerant of both and formatting
//! reproduces a requested style exactly.

/// How a cloud renders SOA record text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoaStyle {
    /// `mname rname serial refresh retry expire minimum`
    Canonical,
    /// `mname rname (serial refresh retry expire minimum)`
    Parenthesized,
}

impl SoaStyle {
    /// Detect the style of an observed SOA value.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        if text.contains('(') {
            Self::Parenthesized
        } else {
            Self::Canonical
        }
    }
}

/// A parsed apex SOA record value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaRecord {
    /// Primary nameserver.
    pub mname: String,
    /// Responsible party, in rname form (dots for `@`).
    pub rname: String,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

impl SoaRecord {
    /// Parse an SOA value in either style.
    pub fn parse(text: &str) -> Result<Self, String> {
        let cleaned = text.replace(['(', ')'], " ");
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        if tokens.len() != 7 {
            return Err(format!("expected 7 fields, found {}", tokens.len()));
        }

        let number = |index: usize, field: &str| -> Result<u32, String> {
            tokens[index]
                .parse::<u32>()
                .map_err(|_| format!("{field} '{}' is not a number", tokens[index]))
        };

        Ok(Self {
            mname: tokens[0].to_string(),
            rname: tokens[1].to_string(),
            serial: number(2, "serial")?,
            refresh: number(3, "refresh")?,
            retry: number(4, "retry")?,
            expire: number(5, "expire")?,
            minimum: number(6, "minimum")?,
        })
    }

    /// Render this record in the given style, byte-exactly.
    #[must_use]
    pub fn format(&self, style: SoaStyle) -> String {
        match style {
            SoaStyle::Canonical => format!(
                "{} {} {} {} {} {} {}",
                self.mname,
                self.rname,
                self.serial,
                self.refresh,
                self.retry,
                self.expire,
                self.minimum
            ),
            SoaStyle::Parenthesized => format!(
                "{} {} ({} {} {} {} {})",
                self.mname,
                self.rname,
                self.serial,
                self.refresh,
                self.retry,
                self.expire,
                self.minimum
            ),
        }
    }

    /// The responsible-party email for this record.
    #[must_use]
    pub fn email(&self) -> String {
        rname_to_email(&self.rname)
    }
}

/// Convert an email address to SOA rname form: dots in the local part get
/// escaped, the `@` becomes a dot, and a trailing dot is appended.
#[must_use]
pub fn email_to_rname(email: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        // Already rname-shaped; just make sure it's fully qualified.
        return if email.ends_with('.') {
            email.to_string()
        } else {
            format!("{email}.")
        };
    };
    let local = local.replace('.', "\\.");
    let domain = domain.trim_end_matches('.');
    format!("{local}.{domain}.")
}

/// Convert an SOA rname back to an email address. The first unescaped dot
/// separates the local part from the domain.
#[must_use]
pub fn rname_to_email(rname: &str) -> String {
    let rname = rname.trim_end_matches('.');
    let mut local = String::new();
    let mut chars = rname.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    local.push(escaped);
                }
            }
            '.' => {
                let domain = &rname[i + 1..];
                return format!("{local}@{domain}");
            }
            _ => local.push(c),
        }
    }
    // No unescaped dot; nothing to split on.
    local
}
