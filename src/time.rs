use chrono::{DateTime, Datelike, FixedOffset, Offset, TimeZone, Timelike, Utc};

const CHINA_STANDARD_TIME: i32 = 8 * 3600;

/// Renders "today / N days later" labels for contest start times.
#[derive(Debug, Clone, Copy)]
pub struct TimeFormatter {
    zone: FixedOffset,
}

impl TimeFormatter {
    pub fn new(zone: FixedOffset) -> Self {
        Self { zone }
    }

    /// Formatter for a zone `seconds` east of UTC. Out-of-range offsets fall
    /// back to UTC+08:00.
    pub fn from_offset_seconds(seconds: i32) -> Self {
        Self::new(FixedOffset::east_opt(seconds).unwrap_or_else(china_standard_time))
    }

    pub fn zone(&self) -> FixedOffset {
        self.zone
    }

    /// Day label plus `HH:MM` of `target` in the display zone.
    ///
    /// The day count is the day-of-month of the Unix epoch shifted by
    /// `|target - now|`, read in the display zone, minus one. It wraps at the
    /// month boundary: 31 days out reads as "today" again.
    pub fn format_countdown<Tz: TimeZone>(
        &self,
        target: &DateTime<Tz>,
        now: &DateTime<Utc>,
    ) -> String {
        let target = target.with_timezone(&self.zone);
        let delta = (target.with_timezone(&Utc) - *now).abs();
        let day = self
            .zone
            .timestamp_opt(delta.num_seconds(), 0)
            .single()
            .map_or(1, |shifted| shifted.day());

        let label = if day == 1 {
            "今天".to_string()
        } else {
            format!("{}天后", day - 1)
        };
        format!("{label}     {:02}:{:02}", target.hour(), target.minute())
    }
}

impl Default for TimeFormatter {
    fn default() -> Self {
        Self::new(china_standard_time())
    }
}

fn china_standard_time() -> FixedOffset {
    FixedOffset::east_opt(CHINA_STANDARD_TIME).unwrap_or(Utc.fix())
}
