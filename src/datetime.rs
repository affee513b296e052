//! Date and time value types
//!
//! TOML has four calendar kinds and no time zone database: an offset
//! date-time pins an instant, the three local kinds are wall-clock values.
//! Decoding here goes from a scanner image (already shape-checked by the
//! token pattern) to a range-checked value.

use std::fmt;

/// The four date/time kinds TOML distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTime {
    OffsetDateTime(Date, Time, Offset),
    LocalDateTime(Date, Time),
    LocalDate(Date),
    LocalTime(Time),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanos: u32,
}

/// UTC offset of an offset date-time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offset {
    /// `Z`
    Utc,
    /// Signed minutes east of UTC
    Custom(i16),
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if self.nanos > 0 {
            let frac = format!("{:09}", self.nanos);
            write!(f, ".{}", frac.trim_end_matches('0'))?;
        }
        Ok(())
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Offset::Utc => f.write_str("Z"),
            Offset::Custom(minutes) => {
                let sign = if minutes < 0 { '-' } else { '+' };
                let abs = minutes.unsigned_abs();
                write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
            }
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTime::OffsetDateTime(date, time, offset) => {
                write!(f, "{date}T{time}{offset}")
            }
            DateTime::LocalDateTime(date, time) => write!(f, "{date}T{time}"),
            DateTime::LocalDate(date) => date.fmt(f),
            DateTime::LocalTime(time) => time.fmt(f),
        }
    }
}

fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

fn parse_fixed(digits: &str) -> u32 {
    digits.bytes().fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'))
}

/// Decodes a `YYYY-MM-DD` image. The token pattern has checked the shape;
/// this checks the calendar.
pub fn parse_date(image: &str) -> Result<Date, String> {
    if let Some(rest) = image.strip_prefix('-') {
        return Err(format!("negative year in date `-{rest}`"));
    }
    let year = parse_fixed(&image[0..4]) as u16;
    let month = parse_fixed(&image[5..7]) as u8;
    let day = parse_fixed(&image[8..10]) as u8;
    if !(1..=12).contains(&month) {
        return Err(format!("month {month} is out of range in `{image}`"));
    }
    if day < 1 || day > days_in_month(year, month) {
        return Err(format!("day {day} is out of range in `{image}`"));
    }
    Ok(Date { year, month, day })
}

/// Decodes a `hh:mm:ss` image with an optional fractional part, keeping
/// nanosecond precision (further digits are truncated).
pub fn parse_time(image: &str) -> Result<Time, String> {
    let hour = parse_fixed(&image[0..2]) as u8;
    let minute = parse_fixed(&image[3..5]) as u8;
    let second = parse_fixed(&image[6..8]) as u8;
    if hour > 23 {
        return Err(format!("hour {hour} is out of range in `{image}`"));
    }
    if minute > 59 {
        return Err(format!("minute {minute} is out of range in `{image}`"));
    }
    if second > 59 {
        return Err(format!("second {second} is out of range in `{image}`"));
    }
    let nanos = match image.get(9..) {
        Some(frac) if image.as_bytes().get(8) == Some(&b'.') => {
            let mut value = 0u32;
            for b in frac.bytes().take(9) {
                value = value * 10 + u32::from(b - b'0');
            }
            value * 10u32.pow(9u32.saturating_sub(frac.len().min(9) as u32))
        }
        _ => 0,
    };
    Ok(Time { hour, minute, second, nanos })
}

fn parse_offset(image: &str) -> Result<Offset, String> {
    if image.eq_ignore_ascii_case("z") {
        return Ok(Offset::Utc);
    }
    let negative = image.starts_with('-');
    let hours = parse_fixed(&image[1..3]) as i16;
    let minutes = parse_fixed(&image[4..6]) as i16;
    if hours > 23 {
        return Err(format!("offset hour {hours} is out of range in `{image}`"));
    }
    if minutes > 59 {
        return Err(format!("offset minute {minutes} is out of range in `{image}`"));
    }
    let total = hours * 60 + minutes;
    Ok(Offset::Custom(if negative { -total } else { total }))
}

/// Decodes an offset date-time image (`date [Tt ] time offset`)
pub fn parse_offset_date_time(image: &str) -> Result<DateTime, String> {
    let date = parse_date(&image[0..10])?;
    let offset_start = image
        .rfind(['Z', 'z', '+'])
        .or_else(|| image[11..].rfind('-').map(|i| i + 11))
        .ok_or_else(|| format!("missing offset in `{image}`"))?;
    let time = parse_time(&image[11..offset_start])?;
    let offset = parse_offset(&image[offset_start..])?;
    Ok(DateTime::OffsetDateTime(date, time, offset))
}

/// Decodes a local date-time image (`date [Tt ] time`)
pub fn parse_local_date_time(image: &str) -> Result<DateTime, String> {
    let date = parse_date(&image[0..10])?;
    let time = parse_time(&image[11..])?;
    Ok(DateTime::LocalDateTime(date, time))
}

pub fn parse_local_date(image: &str) -> Result<DateTime, String> {
    parse_date(image).map(DateTime::LocalDate)
}

pub fn parse_local_time(image: &str) -> Result<DateTime, String> {
    parse_time(image).map(DateTime::LocalTime)
}
