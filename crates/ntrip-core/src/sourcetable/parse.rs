//! Turn sourcetable text into [`Mountpoint`] records.

use super::{FieldMap, MissingBitrate, Mountpoint, ParseOptions};

const STR_PREFIX: &str = "STR;";

/// Parses a sourcetable body with the default options.
///
/// Never fails: lines that are not `STR;` records are skipped, and bad
/// fields inside a record become absent.
pub fn parse(body: &str) -> Vec<Mountpoint> {
    parse_with(body, &ParseOptions::default())
}

/// Parses raw response bytes. Invalid UTF-8 is replaced, so a corrupt
/// byte only damages the line it sits on.
pub fn parse_bytes(body: &[u8], opts: &ParseOptions) -> Vec<Mountpoint> {
    parse_with(&String::from_utf8_lossy(body), opts)
}

/// Parses a sourcetable body, one record per `STR;` line, in input order.
pub fn parse_with(body: &str, opts: &ParseOptions) -> Vec<Mountpoint> {
    let map = opts.layout.fields();
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| line.starts_with(STR_PREFIX))
        .map(|line| {
            let fields: Vec<&str> = line.split(';').collect();
            record(&fields, &map, opts.missing_bitrate)
        })
        .collect()
}

fn record(fields: &[&str], map: &FieldMap, missing_bitrate: MissingBitrate) -> Mountpoint {
    let bitrate = integer(fields, map.bitrate).or(match missing_bitrate {
        MissingBitrate::Absent => None,
        MissingBitrate::Zero => Some(0),
    });

    Mountpoint {
        mountpoint: text(fields, map.mountpoint),
        location: map.location.and_then(|i| text(fields, i)),
        format: text(fields, map.format),
        format_details: text(fields, map.format_details),
        carrier: text(fields, map.carrier),
        nav_system: text(fields, map.nav_system),
        network: text(fields, map.network),
        country: text(fields, map.country),
        latitude: float(fields, map.latitude),
        longitude: float(fields, map.longitude),
        nmea: flag(fields, map.nmea),
        authentication: flag(fields, map.authentication),
        fee: flag(fields, map.fee),
        bitrate,
    }
}

fn text(fields: &[&str], i: usize) -> Option<String> {
    fields
        .get(i)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn float(fields: &[&str], i: usize) -> Option<f64> {
    fields
        .get(i)
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn integer(fields: &[&str], i: usize) -> Option<u32> {
    fields.get(i).and_then(|s| s.trim().parse::<u32>().ok())
}

fn flag(fields: &[&str], i: usize) -> bool {
    fields.get(i).is_some_and(|s| *s == "Y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sourcetable::StrLayout;

    const FULL: &str =
        "STR;MOUNT1;Wellington;RTCM 3.2;1004(1),1006(10);2;GPS+GLO;NET1;NZ;-41.3;174.8;Y;N;Y;9600";

    #[test]
    fn empty_body() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n\r\n").is_empty());
    }

    #[test]
    fn full_record() {
        let mps = parse(FULL);
        assert_eq!(mps.len(), 1);
        let m = &mps[0];
        assert_eq!(m.mountpoint.as_deref(), Some("MOUNT1"));
        assert_eq!(m.location.as_deref(), Some("Wellington"));
        assert_eq!(m.format.as_deref(), Some("RTCM 3.2"));
        assert_eq!(m.format_details.as_deref(), Some("1004(1),1006(10)"));
        assert_eq!(m.carrier.as_deref(), Some("2"));
        assert_eq!(m.nav_system.as_deref(), Some("GPS+GLO"));
        assert_eq!(m.network.as_deref(), Some("NET1"));
        assert_eq!(m.country.as_deref(), Some("NZ"));
        assert!((m.latitude.unwrap() - -41.3).abs() < 1e-9);
        assert!((m.longitude.unwrap() - 174.8).abs() < 1e-9);
        assert!(m.nmea);
        assert!(!m.authentication);
        assert!(m.fee);
        assert_eq!(m.bitrate, Some(9600));
    }

    #[test]
    fn truncated_line_has_absent_trailing_fields() {
        let mps = parse("STR;MOUNT1;Wellington;RTCM 3.2;1004(1);2;GPS;NET1;NZ;-41.3;174.8;Y;N;Y");
        assert_eq!(mps.len(), 1);
        assert_eq!(mps[0].bitrate, None);
        assert!(mps[0].fee);

        let short = parse("STR;ONLY");
        assert_eq!(short.len(), 1);
        assert_eq!(short[0].mountpoint.as_deref(), Some("ONLY"));
        assert_eq!(short[0].format, None);
        assert_eq!(short[0].latitude, None);
        assert!(!short[0].nmea && !short[0].authentication && !short[0].fee);
        assert_eq!(short[0].bitrate, None);
    }

    #[test]
    fn bare_tag_yields_empty_record() {
        let mps = parse("STR;");
        assert_eq!(mps, vec![Mountpoint::default()]);
    }

    #[test]
    fn empty_fields_are_absent_not_empty_strings() {
        let mps = parse("STR;M;;;;;;;;;;;;;");
        assert_eq!(mps[0].mountpoint.as_deref(), Some("M"));
        assert_eq!(mps[0].location, None);
        assert_eq!(mps[0].network, None);
        assert_eq!(mps[0].latitude, None);
        assert_eq!(mps[0].bitrate, None);
    }

    #[test]
    fn unparseable_numbers_are_absent() {
        let mps = parse("STR;M;L;RTCM 3;x;2;GPS;N;NZ;north;NaN;Y;N;N;fast");
        assert_eq!(mps[0].latitude, None);
        assert_eq!(mps[0].longitude, None);
        assert_eq!(mps[0].bitrate, None);

        let neg = parse("STR;M;L;RTCM 3;x;2;GPS;N;NZ;1;2;Y;N;N;-5");
        assert_eq!(neg[0].bitrate, None);
    }

    #[test]
    fn zero_is_a_real_value() {
        let mps = parse("STR;M;L;RTCM 3;x;2;GPS;N;NZ;0;0.00;N;N;N;0");
        assert_eq!(mps[0].latitude, Some(0.0));
        assert_eq!(mps[0].longitude, Some(0.0));
        assert_eq!(mps[0].bitrate, Some(0));
    }

    #[test]
    fn numbers_tolerate_padding() {
        let mps = parse("STR;M;L;RTCM 3;x;2;GPS;N;NZ; -36.85 ;174.76 ;N;N;N; 4800");
        assert_eq!(mps[0].latitude, Some(-36.85));
        assert_eq!(mps[0].longitude, Some(174.76));
        assert_eq!(mps[0].bitrate, Some(4800));
    }

    #[test]
    fn flags_require_exact_uppercase_y() {
        let mps = parse("STR;M;L;F;D;2;GPS;N;NZ;1;2;y;Yes;B;1");
        assert!(!mps[0].nmea);
        assert!(!mps[0].authentication);
        assert!(!mps[0].fee);
    }

    #[test]
    fn skips_other_records_and_keeps_order() {
        let body = "SOURCETABLE 200 OK\r\n\
            Content-Type: text/plain\r\n\
            \r\n\
            CAS;caster.example.com;2101;EX;Example;0;NZL;-41;174\r\n\
            STR;FIRST;A;RTCM 3.2;;2;GPS;NET;NZ;-41;174;N;N;N;1200\r\n\
            NET;NET;Example;B;N;https://example.com;;;\r\n\
            str;lowercase;ignored\r\n\
            \r\n\
            STR;SECOND;B;RTCM 3.2;;2;GPS;NET;NZ;-42;175;N;Y;N;2400\r\n\
            STR;FIRST;dup;RTCM 3.0;;2;GPS;NET;NZ;-43;176;N;N;N;\r\n\
            ENDSOURCETABLE\r\n";
        let names: Vec<_> = parse(body)
            .into_iter()
            .map(|m| m.mountpoint.unwrap_or_default())
            .collect();
        assert_eq!(names, ["FIRST", "SECOND", "FIRST"]);
    }

    #[test]
    fn crlf_does_not_leak_into_last_field() {
        let mps = parse("STR;M;L;F;D;2;GPS;N;NZ;1;2;N;N;Y;9600\r\n");
        assert_eq!(mps[0].bitrate, Some(9600));
        let mps = parse("STR;M;L;F;D;2;GPS;N;NZ;1;2;N;N;Y\r\n");
        assert!(mps[0].fee);
    }

    #[test]
    fn leading_whitespace_is_not_a_record() {
        assert!(parse(" STR;M;L").is_empty());
    }

    #[test]
    fn compact_layout() {
        let opts = ParseOptions {
            layout: StrLayout::Compact,
            ..Default::default()
        };
        let mps = parse_with(
            "STR;MOUNT1;RTCM 3.2;1004(1);2;GPS+GLO;NET1;NZ;-41.3;174.8;Y;N;Y;9600",
            &opts,
        );
        let m = &mps[0];
        assert_eq!(m.location, None);
        assert_eq!(m.format.as_deref(), Some("RTCM 3.2"));
        assert_eq!(m.country.as_deref(), Some("NZ"));
        assert_eq!(m.latitude, Some(-41.3));
        assert!(m.nmea && !m.authentication && m.fee);
        assert_eq!(m.bitrate, Some(9600));
    }

    #[test]
    fn legacy_zero_bitrate() {
        let opts = ParseOptions {
            missing_bitrate: MissingBitrate::Zero,
            ..Default::default()
        };
        let mps = parse_with("STR;A;L;F;D;2;GPS;N;NZ;1;2;N;N;N;abc\nSTR;B\nSTR;C;L;F;D;2;GPS;N;NZ;1;2;N;N;N;300", &opts);
        assert_eq!(mps[0].bitrate, Some(0));
        assert_eq!(mps[1].bitrate, Some(0));
        assert_eq!(mps[2].bitrate, Some(300));
        // Only the bitrate falls back; coordinates stay absent.
        assert_eq!(mps[1].latitude, None);
    }

    #[test]
    fn invalid_utf8_only_affects_its_line() {
        let mut body = b"STR;GOOD;L;F;D;2;GPS;N;NZ;1;2;N;N;N;100\n".to_vec();
        body.extend_from_slice(b"STR;B\xffAD;L;F;D;2;GPS;N;NZ;1;2;N;N;N;200\n");
        body.extend_from_slice(b"STR;ALSO_GOOD;L;F;D;2;GPS;N;NZ;1;2;N;N;N;300");
        let mps = parse_bytes(&body, &ParseOptions::default());
        assert_eq!(mps.len(), 3);
        assert_eq!(mps[0].mountpoint.as_deref(), Some("GOOD"));
        assert_eq!(mps[1].mountpoint.as_deref(), Some("B\u{FFFD}AD"));
        assert_eq!(mps[1].bitrate, Some(200));
        assert_eq!(mps[2].mountpoint.as_deref(), Some("ALSO_GOOD"));
    }
}
