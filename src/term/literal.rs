//! Typed literal values
//!
//! A literal carries a lexical form and an XSD datatype. The lexical form is
//! validated against the datatype at construction, so the typed projections
//! succeed exactly when the stored datatype is in the compatible category.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::core::ns;
use crate::error::{SqwrlError, SqwrlResult};
use crate::term::Iri;

/// Supported XSD datatypes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum XsdDatatype {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    AnyUri,
    Date,
    Time,
    DateTime,
    Duration,
}

impl XsdDatatype {
    /// The XSD local name of this datatype
    pub fn local_name(&self) -> &'static str {
        match self {
            XsdDatatype::Boolean => "boolean",
            XsdDatatype::Byte => "byte",
            XsdDatatype::Short => "short",
            XsdDatatype::Int => "int",
            XsdDatatype::Long => "long",
            XsdDatatype::Float => "float",
            XsdDatatype::Double => "double",
            XsdDatatype::String => "string",
            XsdDatatype::AnyUri => "anyURI",
            XsdDatatype::Date => "date",
            XsdDatatype::Time => "time",
            XsdDatatype::DateTime => "dateTime",
            XsdDatatype::Duration => "duration",
        }
    }

    /// The full IRI of this datatype
    pub fn iri(&self) -> Iri {
        Iri::new(ns::uri(ns::XSD, self.local_name()))
    }

    /// Resolve a datatype from its IRI
    pub fn from_iri(iri: &Iri) -> Option<XsdDatatype> {
        let local = ns::local_name(iri.as_str(), ns::XSD)?;
        match local {
            "boolean" => Some(XsdDatatype::Boolean),
            "byte" => Some(XsdDatatype::Byte),
            "short" => Some(XsdDatatype::Short),
            "int" => Some(XsdDatatype::Int),
            "long" => Some(XsdDatatype::Long),
            "float" => Some(XsdDatatype::Float),
            "double" => Some(XsdDatatype::Double),
            "string" => Some(XsdDatatype::String),
            "anyURI" => Some(XsdDatatype::AnyUri),
            "date" => Some(XsdDatatype::Date),
            "time" => Some(XsdDatatype::Time),
            "dateTime" => Some(XsdDatatype::DateTime),
            "duration" => Some(XsdDatatype::Duration),
            _ => None,
        }
    }

    /// True for byte, short, int, long, float, double
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            XsdDatatype::Byte
                | XsdDatatype::Short
                | XsdDatatype::Int
                | XsdDatatype::Long
                | XsdDatatype::Float
                | XsdDatatype::Double
        )
    }

    /// True for byte, short, int, long
    pub fn is_integer_kinded(&self) -> bool {
        matches!(
            self,
            XsdDatatype::Byte | XsdDatatype::Short | XsdDatatype::Int | XsdDatatype::Long
        )
    }
}

impl fmt::Display for XsdDatatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "xsd:{}", self.local_name())
    }
}

/// An XSD duration: sign, year/month part, and day/time part in seconds
///
/// The XSD duration order is partial; this type imposes a total order by
/// comparing sign, then months, then seconds.
#[derive(Clone, Debug)]
pub struct XsdDuration {
    negative: bool,
    months: u32,
    seconds: f64,
}

impl XsdDuration {
    pub fn new(negative: bool, months: u32, seconds: f64) -> Self {
        XsdDuration {
            negative,
            months,
            seconds,
        }
    }

    /// Parse the `PnYnMnDTnHnMnS` lexical form
    pub fn parse(lexical: &str) -> SqwrlResult<XsdDuration> {
        let bad = || SqwrlError::literal_type(format!("invalid xsd:duration value {}", lexical));

        let (negative, rest) = match lexical.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, lexical),
        };
        let rest = rest.strip_prefix('P').ok_or_else(bad)?;
        if rest.is_empty() {
            return Err(bad());
        }

        let mut months = 0u32;
        let mut seconds = 0f64;
        let mut in_time = false;
        let mut saw_component = false;
        let mut number = String::new();

        for c in rest.chars() {
            match c {
                'T' if !in_time && number.is_empty() => in_time = true,
                '0'..='9' | '.' => number.push(c),
                designator => {
                    if number.is_empty() {
                        return Err(bad());
                    }
                    let value: f64 = number.parse().map_err(|_| bad())?;
                    number.clear();
                    saw_component = true;
                    match (designator, in_time) {
                        ('Y', false) => months += value as u32 * 12,
                        ('M', false) => months += value as u32,
                        ('D', false) => seconds += value * 86_400.0,
                        ('H', true) => seconds += value * 3_600.0,
                        ('M', true) => seconds += value * 60.0,
                        ('S', true) => seconds += value,
                        _ => return Err(bad()),
                    }
                }
            }
        }

        if !number.is_empty() || !saw_component {
            return Err(bad());
        }

        Ok(XsdDuration::new(negative, months, seconds))
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn months(&self) -> u32 {
        self.months
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Total order: sign, then months, then seconds
    pub fn compare(&self, other: &XsdDuration) -> Ordering {
        let sign = |d: &XsdDuration| if d.negative { -1 } else { 1 };
        sign(self)
            .cmp(&sign(other))
            .then_with(|| {
                let o = self
                    .months
                    .cmp(&other.months)
                    .then(self.seconds.total_cmp(&other.seconds));
                if self.negative {
                    o.reverse()
                } else {
                    o
                }
            })
    }
}

impl PartialEq for XsdDuration {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for XsdDuration {}

impl fmt::Display for XsdDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "P")?;
        let years = self.months / 12;
        let months = self.months % 12;
        if years > 0 {
            write!(f, "{}Y", years)?;
        }
        if months > 0 {
            write!(f, "{}M", months)?;
        }
        let days = (self.seconds / 86_400.0).floor();
        let remainder = self.seconds - days * 86_400.0;
        if days > 0.0 {
            write!(f, "{}D", days as u64)?;
        }
        if remainder > 0.0 || (self.months == 0 && days == 0.0) {
            write!(f, "T{}S", remainder)?;
        }
        Ok(())
    }
}

/// A typed literal value
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    lexical: String,
    datatype: XsdDatatype,
}

impl Literal {
    /// Create a literal from a lexical form and datatype, validating the form
    pub fn new(lexical: impl Into<String>, datatype: XsdDatatype) -> SqwrlResult<Literal> {
        let literal = Literal {
            lexical: lexical.into(),
            datatype,
        };
        literal.validate()?;
        Ok(literal)
    }

    /// Create a boolean literal
    pub fn boolean(value: bool) -> Literal {
        Literal {
            lexical: value.to_string(),
            datatype: XsdDatatype::Boolean,
        }
    }

    /// Create a byte literal
    pub fn byte(value: i8) -> Literal {
        Literal {
            lexical: value.to_string(),
            datatype: XsdDatatype::Byte,
        }
    }

    /// Create a short literal
    pub fn short(value: i16) -> Literal {
        Literal {
            lexical: value.to_string(),
            datatype: XsdDatatype::Short,
        }
    }

    /// Create an int literal
    pub fn int(value: i32) -> Literal {
        Literal {
            lexical: value.to_string(),
            datatype: XsdDatatype::Int,
        }
    }

    /// Create a long literal
    pub fn long(value: i64) -> Literal {
        Literal {
            lexical: value.to_string(),
            datatype: XsdDatatype::Long,
        }
    }

    /// Create a float literal
    pub fn float(value: f32) -> Literal {
        let lexical = if value == f32::INFINITY {
            "INF".to_string()
        } else if value == f32::NEG_INFINITY {
            "-INF".to_string()
        } else {
            value.to_string()
        };
        Literal {
            lexical,
            datatype: XsdDatatype::Float,
        }
    }

    /// Create a double literal
    pub fn double(value: f64) -> Literal {
        Literal {
            lexical: format_float(value),
            datatype: XsdDatatype::Double,
        }
    }

    /// Create a string literal
    pub fn string(value: impl Into<String>) -> Literal {
        Literal {
            lexical: value.into(),
            datatype: XsdDatatype::String,
        }
    }

    /// Create an anyURI literal
    pub fn any_uri(value: impl Into<String>) -> Literal {
        Literal {
            lexical: value.into(),
            datatype: XsdDatatype::AnyUri,
        }
    }

    /// Create a date literal
    pub fn date(value: NaiveDate) -> Literal {
        Literal {
            lexical: value.format("%Y-%m-%d").to_string(),
            datatype: XsdDatatype::Date,
        }
    }

    /// Create a time literal
    pub fn time(value: NaiveTime) -> Literal {
        Literal {
            lexical: value.format("%H:%M:%S%.f").to_string(),
            datatype: XsdDatatype::Time,
        }
    }

    /// Create a dateTime literal
    pub fn date_time(value: NaiveDateTime) -> Literal {
        Literal {
            lexical: value.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            datatype: XsdDatatype::DateTime,
        }
    }

    /// Create a duration literal
    pub fn duration(value: XsdDuration) -> Literal {
        Literal {
            lexical: value.to_string(),
            datatype: XsdDatatype::Duration,
        }
    }

    /// Get the lexical form
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    /// Get the datatype
    pub fn datatype(&self) -> XsdDatatype {
        self.datatype
    }

    // ========================================================================
    // Kind predicates
    // ========================================================================

    pub fn is_numeric(&self) -> bool {
        self.datatype.is_numeric()
    }

    pub fn is_boolean(&self) -> bool {
        self.datatype == XsdDatatype::Boolean
    }

    pub fn is_byte(&self) -> bool {
        self.datatype == XsdDatatype::Byte
    }

    pub fn is_short(&self) -> bool {
        self.datatype == XsdDatatype::Short
    }

    pub fn is_int(&self) -> bool {
        self.datatype == XsdDatatype::Int
    }

    pub fn is_long(&self) -> bool {
        self.datatype == XsdDatatype::Long
    }

    pub fn is_float(&self) -> bool {
        self.datatype == XsdDatatype::Float
    }

    pub fn is_double(&self) -> bool {
        self.datatype == XsdDatatype::Double
    }

    pub fn is_string(&self) -> bool {
        self.datatype == XsdDatatype::String
    }

    pub fn is_any_uri(&self) -> bool {
        self.datatype == XsdDatatype::AnyUri
    }

    pub fn is_date(&self) -> bool {
        self.datatype == XsdDatatype::Date
    }

    pub fn is_time(&self) -> bool {
        self.datatype == XsdDatatype::Time
    }

    pub fn is_date_time(&self) -> bool {
        self.datatype == XsdDatatype::DateTime
    }

    pub fn is_duration(&self) -> bool {
        self.datatype == XsdDatatype::Duration
    }

    /// True for kinds that participate in ordering
    pub fn is_comparable(&self) -> bool {
        self.is_numeric()
            || self.is_string()
            || self.is_any_uri()
            || self.is_boolean()
            || self.is_temporal()
    }

    /// True for kinds whose display form is quoted
    pub fn is_quotable(&self) -> bool {
        matches!(
            self.datatype,
            XsdDatatype::String
                | XsdDatatype::AnyUri
                | XsdDatatype::Date
                | XsdDatatype::Time
                | XsdDatatype::DateTime
                | XsdDatatype::Duration
        )
    }

    fn is_temporal(&self) -> bool {
        matches!(
            self.datatype,
            XsdDatatype::Date | XsdDatatype::Time | XsdDatatype::DateTime | XsdDatatype::Duration
        )
    }

    // ========================================================================
    // Typed projections
    // ========================================================================

    /// Project as a boolean
    pub fn as_boolean(&self) -> SqwrlResult<bool> {
        if !self.is_boolean() {
            return Err(self.projection_error("boolean"));
        }
        parse_boolean(&self.lexical)
            .ok_or_else(|| self.projection_error("boolean"))
    }

    /// Project as a byte
    pub fn as_byte(&self) -> SqwrlResult<i8> {
        if !self.is_byte() {
            return Err(self.projection_error("byte"));
        }
        self.parse_number()
    }

    /// Project as a short (accepts byte, short)
    pub fn as_short(&self) -> SqwrlResult<i16> {
        if !matches!(self.datatype, XsdDatatype::Byte | XsdDatatype::Short) {
            return Err(self.projection_error("short"));
        }
        self.parse_number()
    }

    /// Project as an int (accepts byte, short, int)
    pub fn as_int(&self) -> SqwrlResult<i32> {
        if !matches!(
            self.datatype,
            XsdDatatype::Byte | XsdDatatype::Short | XsdDatatype::Int
        ) {
            return Err(self.projection_error("int"));
        }
        self.parse_number()
    }

    /// Project as a long (accepts any integer kind)
    pub fn as_long(&self) -> SqwrlResult<i64> {
        if !self.datatype.is_integer_kinded() {
            return Err(self.projection_error("long"));
        }
        self.parse_number()
    }

    /// Project as a float
    pub fn as_float(&self) -> SqwrlResult<f32> {
        if !self.is_float() {
            return Err(self.projection_error("float"));
        }
        parse_float(&self.lexical).ok_or_else(|| self.projection_error("float"))
    }

    /// Project as a double (accepts any numeric kind)
    pub fn as_double(&self) -> SqwrlResult<f64> {
        if !self.is_numeric() {
            return Err(self.projection_error("double"));
        }
        parse_double(&self.lexical).ok_or_else(|| self.projection_error("double"))
    }

    /// Project as a string
    pub fn as_string(&self) -> SqwrlResult<&str> {
        if !self.is_string() {
            return Err(self.projection_error("string"));
        }
        Ok(&self.lexical)
    }

    /// Project as an anyURI
    pub fn as_any_uri(&self) -> SqwrlResult<&str> {
        if !self.is_any_uri() {
            return Err(self.projection_error("anyURI"));
        }
        Ok(&self.lexical)
    }

    /// Project as a date
    pub fn as_date(&self) -> SqwrlResult<NaiveDate> {
        if !self.is_date() {
            return Err(self.projection_error("date"));
        }
        parse_date(&self.lexical).ok_or_else(|| self.projection_error("date"))
    }

    /// Project as a time
    pub fn as_time(&self) -> SqwrlResult<NaiveTime> {
        if !self.is_time() {
            return Err(self.projection_error("time"));
        }
        parse_time(&self.lexical).ok_or_else(|| self.projection_error("time"))
    }

    /// Project as a dateTime
    pub fn as_date_time(&self) -> SqwrlResult<NaiveDateTime> {
        if !self.is_date_time() {
            return Err(self.projection_error("dateTime"));
        }
        parse_date_time(&self.lexical).ok_or_else(|| self.projection_error("dateTime"))
    }

    /// Project as a duration
    pub fn as_duration(&self) -> SqwrlResult<XsdDuration> {
        if !self.is_duration() {
            return Err(self.projection_error("duration"));
        }
        XsdDuration::parse(&self.lexical)
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Total order over comparable kinds
    ///
    /// Numerics compare in double precision, except when both operands are
    /// integer-kinded; those widen to 64-bit integers so magnitudes beyond
    /// double's mantissa still compare with the correct sign. Non-numeric
    /// kinds compare only with the same kind; anything else is a
    /// literal-type error.
    pub fn compare(&self, other: &Literal) -> SqwrlResult<Ordering> {
        if self.is_numeric() && other.is_numeric() {
            if self.datatype.is_integer_kinded() && other.datatype.is_integer_kinded() {
                return Ok(self.as_long()?.cmp(&other.as_long()?));
            }
            return Ok(self.as_double()?.total_cmp(&other.as_double()?));
        }

        match (self.datatype, other.datatype) {
            (XsdDatatype::Boolean, XsdDatatype::Boolean) => {
                Ok(self.as_boolean()?.cmp(&other.as_boolean()?))
            }
            (XsdDatatype::String, XsdDatatype::String)
            | (XsdDatatype::AnyUri, XsdDatatype::AnyUri) => {
                Ok(self.lexical.cmp(&other.lexical))
            }
            (XsdDatatype::Date, XsdDatatype::Date) => Ok(self.as_date()?.cmp(&other.as_date()?)),
            (XsdDatatype::Time, XsdDatatype::Time) => Ok(self.as_time()?.cmp(&other.as_time()?)),
            (XsdDatatype::DateTime, XsdDatatype::DateTime) => {
                Ok(self.as_date_time()?.cmp(&other.as_date_time()?))
            }
            (XsdDatatype::Duration, XsdDatatype::Duration) => {
                Ok(self.as_duration()?.compare(&other.as_duration()?))
            }
            (a, b) => Err(SqwrlError::literal_type(format!(
                "cannot compare {} value {} with {} value {}",
                a, self.lexical, b, other.lexical
            ))),
        }
    }

    /// The quoted display form: strings, URIs, and temporal values quoted;
    /// numerics and booleans bare
    pub fn to_quoted_string(&self) -> String {
        if self.is_quotable() {
            format!("\"{}\"", self.lexical)
        } else {
            self.lexical.clone()
        }
    }

    fn validate(&self) -> SqwrlResult<()> {
        let ok = match self.datatype {
            XsdDatatype::Boolean => parse_boolean(&self.lexical).is_some(),
            XsdDatatype::Byte => self.lexical.parse::<i8>().is_ok(),
            XsdDatatype::Short => self.lexical.parse::<i16>().is_ok(),
            XsdDatatype::Int => self.lexical.parse::<i32>().is_ok(),
            XsdDatatype::Long => self.lexical.parse::<i64>().is_ok(),
            XsdDatatype::Float | XsdDatatype::Double => parse_double(&self.lexical).is_some(),
            XsdDatatype::String | XsdDatatype::AnyUri => true,
            XsdDatatype::Date => parse_date(&self.lexical).is_some(),
            XsdDatatype::Time => parse_time(&self.lexical).is_some(),
            XsdDatatype::DateTime => parse_date_time(&self.lexical).is_some(),
            XsdDatatype::Duration => XsdDuration::parse(&self.lexical).is_ok(),
        };

        if ok {
            Ok(())
        } else {
            Err(SqwrlError::literal_type(format!(
                "invalid lexical form {} for datatype {}",
                self.lexical, self.datatype
            )))
        }
    }

    fn parse_number<T: std::str::FromStr>(&self) -> SqwrlResult<T> {
        self.lexical
            .parse::<T>()
            .map_err(|_| self.projection_error(self.datatype.local_name()))
    }

    fn projection_error(&self, wanted: &str) -> SqwrlError {
        SqwrlError::literal_type(format!(
            "cannot project {} value {} as {}",
            self.datatype, self.lexical, wanted
        ))
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"^^{}", self.lexical, self.datatype)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexical)
    }
}

fn parse_boolean(lexical: &str) -> Option<bool> {
    match lexical {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

// XSD spells infinities INF/-INF; Rust's float parser expects inf
fn parse_double(lexical: &str) -> Option<f64> {
    match lexical {
        "INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        _ => lexical.parse().ok(),
    }
}

fn parse_float(lexical: &str) -> Option<f32> {
    match lexical {
        "INF" => Some(f32::INFINITY),
        "-INF" => Some(f32::NEG_INFINITY),
        _ => lexical.parse().ok(),
    }
}

fn parse_date(lexical: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(lexical, "%Y-%m-%d").ok()
}

fn parse_time(lexical: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(lexical, "%H:%M:%S%.f").ok()
}

fn parse_date_time(lexical: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(lexical, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

fn format_float(value: f64) -> String {
    if value == f64::INFINITY {
        "INF".to_string()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        value.to_string()
    }
}
