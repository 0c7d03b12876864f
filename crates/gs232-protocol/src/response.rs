//! Reply builder.
//!
//! [`build_response`] maps a parsed [`Command`] and the live context to the
//! exact bytes the rotator sends back. It is total: every command, including
//! [`Command::Unknown`], has a reply.

use bytes::{BufMut, BytesMut};
use gs232_core::types::{AngleMode, CenterReference, ProtocolVariant};

use crate::commands::Command;
use crate::context::ProtocolContext;
use crate::protocol::{LINE_FEED, REJECTION_REPLY, TERMINATOR};

const HELP_PAGE_1: &str = concat!(
    "---------- COMMAND LIST 1 ----------\n",
    "R  Clockwise Rotation\n",
    "L  Counter Clockwise Rotation\n",
    "A  CW/CCW Rotation Stop\n",
    "C  Antenna Direction Value\n",
    "M  Antenna Direction Setting. MXXX\n",
    "M  Time Interval Direction Setting.\n",
    "   MTTT XXX XXX XXX ---\n",
    "   (TTT = Step value)\n",
    "   (XXX = Horizontal Angle)\n",
    "T  Start Command in the time interval direction setting\n",
    "   mode.\n",
    "N  Total number of setting angles in \"M\" mode and traced\n",
    "   number of all datas (setting angles)\n",
    "X1 Rotation Speed 1 (Horizontal) Low\n",
    "X2 Rotation Speed 2 (Horizontal) Middle 1\n",
    "X3 Rotation Speed 3 (Horizontal) Middle 2\n",
    "X4 Rotation Speed 4 (Horizontal) High\n",
    "S  All Stop\n",
    "O  Offset Calibration\n",
    "F  Full Scale Calibration\r",
);

const HELP_PAGE_2: &str = concat!(
    "---------- HELP COMMAND 2 ----------\n",
    "U  UP Direction Rotation\n",
    "D  DOWN Direction Rotation\n",
    "E  UP/DOWN Direction Rotation Stop\n",
    "C2 Antenna Direction Value\n",
    "W  Antenna Direction Setting.\n",
    "   WXXX YYY\n",
    "W  Time Interval Direction Setting.\n",
    "   WTTT XXX YYY XXX YYY ---\n",
    "   (TTT = Step value)\n",
    "   (XXX = Horizontal Angle)\n",
    "   (YYY = Elevation Angle)\n",
    "T  Start Command in the time interval direction setting\n",
    "   mode.\n",
    "N  Total number of setting angle in \"W\" mode and traced\n",
    "   number of all datas (setting angles)\n",
    "S  All Stop\n",
    "O2 Offset Calibration\n",
    "F2 Full Scale Calibration\n",
    "B  Elevation Antenna Direction Value\r",
);

/// Render the `H3` page for the current angle mode and center reference.
fn help_page_3(mode: AngleMode, center: CenterReference) -> String {
    format!(
        concat!(
            "---------- HELP COMMAND 3 ----------\n",
            "P45 Set_mode 450 Degree\n",
            "P36 Set_mode 360 Degree\n",
            "Z   Switch N Center/S Center\n\n",
            "--------------- MODE ---------------\n",
            "mode {mode}0 Degree\n",
            "{center} Center\r",
        ),
        mode = mode.label(),
        center = center.letter(),
    )
}

/// Build the reply for `command` from the current context.
///
/// # Example
///
/// ```
/// use gs232_protocol::{Command, ProtocolContext, build_response};
///
/// let ctx = ProtocolContext::default();
/// assert_eq!(build_response(&ctx, Command::ReadAzimuth), b"+0000\r");
/// assert_eq!(build_response(&ctx, Command::Unknown), b"?>\r");
/// ```
pub fn build_response(ctx: &ProtocolContext, command: Command) -> Vec<u8> {
    match command {
        Command::ClockwiseRotation
        | Command::UpRotation
        | Command::CounterClockwiseRotation
        | Command::DownRotation
        | Command::AzimuthStop
        | Command::ElevationStop
        | Command::TurnAzimuth
        | Command::TimedTrackingAzimuth
        | Command::TurnAzimuthElevation
        | Command::TimedTrackingAzimuthElevation
        | Command::StartTimedTracking
        | Command::SetSpeed(_)
        | Command::AllStop
        | Command::AzimuthMode360
        | Command::AzimuthMode450
        | Command::ToggleCenter => vec![TERMINATOR],

        // Calibration is acknowledged only; any work happens in the
        // attached hardware.
        Command::OffsetCalibrationAzimuth
        | Command::OffsetCalibrationElevation
        | Command::FullScaleCalibrationAzimuth
        | Command::FullScaleCalibrationElevation => vec![TERMINATOR],

        Command::ReadAzimuth => {
            let mut buf = BytesMut::with_capacity(8);
            put_angle(&mut buf, azimuth_prefix(ctx.variant), ctx.azimuth);
            buf.put_u8(TERMINATOR);
            buf.to_vec()
        }
        Command::ReadAzimuthElevation => {
            let mut buf = BytesMut::with_capacity(16);
            put_angle(&mut buf, azimuth_prefix(ctx.variant), ctx.azimuth);
            put_angle(&mut buf, elevation_prefix(ctx.variant), ctx.elevation);
            buf.put_u8(TERMINATOR);
            buf.put_u8(LINE_FEED);
            buf.to_vec()
        }
        Command::ReadElevation => {
            let mut buf = BytesMut::with_capacity(8);
            put_angle(&mut buf, elevation_prefix(ctx.variant), ctx.elevation);
            buf.put_u8(TERMINATOR);
            buf.to_vec()
        }

        Command::WaypointCount => {
            let marker = match ctx.variant {
                ProtocolVariant::A => "+",
                ProtocolVariant::B => "=",
            };
            let selected = u32::from(ctx.current_point) + 1;
            format!(
                "{marker}{selected:04}{marker}{count:04}\r\n",
                count = ctx.memory_count()
            )
            .into_bytes()
        }

        Command::Help1 => HELP_PAGE_1.as_bytes().to_vec(),
        Command::Help2 => HELP_PAGE_2.as_bytes().to_vec(),
        Command::Help3 => help_page_3(ctx.angle_mode, ctx.center).into_bytes(),

        Command::Unknown => REJECTION_REPLY.to_vec(),
    }
}

fn azimuth_prefix(variant: ProtocolVariant) -> &'static str {
    match variant {
        ProtocolVariant::A => "+0",
        ProtocolVariant::B => "AZ=",
    }
}

fn elevation_prefix(variant: ProtocolVariant) -> &'static str {
    match variant {
        ProtocolVariant::A => "+0",
        ProtocolVariant::B => "EL=",
    }
}

fn put_angle(buf: &mut BytesMut, prefix: &str, degrees: u16) {
    buf.put_slice(prefix.as_bytes());
    buf.put_slice(format!("{degrees:03}").as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::parse;
    use crate::memory::WaypointMemory;
    use gs232_core::types::RotationSpeed;

    fn reply(ctx: &mut ProtocolContext, frame: &[u8]) -> Vec<u8> {
        let command = parse(ctx, frame);
        build_response(ctx, command)
    }

    // ---------------------------------------------------------------
    // Acknowledgements
    // ---------------------------------------------------------------

    #[test]
    fn acknowledged_commands_reply_terminator() {
        let mut ctx = ProtocolContext::new(ProtocolVariant::B);
        let frames: [&[u8]; 17] = [
            b"R\r", b"U\r", b"L\r", b"D\r", b"A\r", b"E\r", b"S\r", b"T\r", b"X1\r", b"X2\r",
            b"X3\r", b"X4\r", b"P45\r", b"P36\r", b"Z\r", b"M090\r", b"W010 020 030\r",
        ];
        for frame in frames {
            assert_eq!(
                reply(&mut ctx, frame),
                b"\r",
                "frame {:?}",
                frame.escape_ascii().to_string()
            );
        }
    }

    #[test]
    fn calibration_replies_terminator() {
        let mut ctx = ProtocolContext::default();
        for frame in [b"O\r", b"F\r"] {
            assert_eq!(reply(&mut ctx, frame), b"\r");
        }
        for frame in [b"O2\r", b"F2\r"] {
            assert_eq!(reply(&mut ctx, frame), b"\r");
        }
    }

    #[test]
    fn unknown_replies_rejection_marker() {
        let mut ctx = ProtocolContext::default();
        assert_eq!(reply(&mut ctx, b"M500\r"), b"?>\r");
        assert_eq!(reply(&mut ctx, b"Q\r"), b"?>\r");
        assert_eq!(reply(&mut ctx, b"R"), b"?>\r");
        assert_eq!(reply(&mut ctx, b"Z\r"), b"?>\r");
    }

    // ---------------------------------------------------------------
    // Position queries
    // ---------------------------------------------------------------

    #[test]
    fn read_azimuth_variant_a() {
        let mut ctx = ProtocolContext::default();
        assert_eq!(reply(&mut ctx, b"C\r"), b"+0000\r");
        ctx.azimuth = 45;
        assert_eq!(reply(&mut ctx, b"C\r"), b"+0045\r");
        ctx.azimuth = 359;
        assert_eq!(reply(&mut ctx, b"c\r\n"), b"+0359\r");
    }

    #[test]
    fn read_azimuth_variant_b() {
        let mut ctx = ProtocolContext::new(ProtocolVariant::B);
        ctx.azimuth = 7;
        assert_eq!(reply(&mut ctx, b"C\r"), b"AZ=007\r");
    }

    #[test]
    fn read_azimuth_elevation() {
        let mut ctx = ProtocolContext::default();
        ctx.azimuth = 123;
        ctx.elevation = 45;
        assert_eq!(reply(&mut ctx, b"C2\r"), b"+0123+0045\r\n");

        ctx.variant = ProtocolVariant::B;
        assert_eq!(reply(&mut ctx, b"C2\r"), b"AZ=123EL=045\r\n");
    }

    #[test]
    fn read_elevation() {
        let mut ctx = ProtocolContext::default();
        ctx.elevation = 90;
        assert_eq!(reply(&mut ctx, b"B\r"), b"+0090\r");

        ctx.variant = ProtocolVariant::B;
        assert_eq!(reply(&mut ctx, b"B\r"), b"EL=090\r");
    }

    #[test]
    fn azimuth_in_450_mode_keeps_three_digits() {
        let mut ctx = ProtocolContext::new(ProtocolVariant::B);
        ctx.azimuth = 450;
        assert_eq!(build_response(&ctx, Command::ReadAzimuth), b"AZ=450\r");
    }

    // ---------------------------------------------------------------
    // Waypoint count
    // ---------------------------------------------------------------

    #[test]
    fn waypoint_count_variant_a() {
        let mut ctx = ProtocolContext::default();
        assert_eq!(reply(&mut ctx, b"N\r"), b"+0001+0000\r\n");
        reply(&mut ctx, b"M010 090 180 270\r");
        assert_eq!(reply(&mut ctx, b"N\r"), b"+0001+0004\r\n");
    }

    #[test]
    fn waypoint_count_variant_b() {
        let mut ctx = ProtocolContext::new(ProtocolVariant::B);
        ctx.memory = WaypointMemory::from_values(&[1; 12]).unwrap();
        ctx.current_point = 2;
        assert_eq!(build_response(&ctx, Command::WaypointCount), b"=0003=0012\r\n");
    }

    // ---------------------------------------------------------------
    // Help pages
    // ---------------------------------------------------------------

    #[test]
    fn help_pages_end_with_terminator() {
        let ctx = ProtocolContext::new(ProtocolVariant::B);
        for command in [Command::Help1, Command::Help2, Command::Help3] {
            let text = build_response(&ctx, command);
            assert_eq!(text.last(), Some(&TERMINATOR));
            assert_eq!(text.iter().filter(|&&b| b == TERMINATOR).count(), 1);
        }
    }

    #[test]
    fn help_page_1_lists_azimuth_commands() {
        let text =
            String::from_utf8(build_response(&ProtocolContext::default(), Command::Help1)).unwrap();
        assert!(text.starts_with("---------- COMMAND LIST 1 ----------\n"));
        assert!(text.contains("X4 Rotation Speed 4 (Horizontal) High\n"));
    }

    #[test]
    fn help_page_2_lists_elevation_commands() {
        let text =
            String::from_utf8(build_response(&ProtocolContext::default(), Command::Help2)).unwrap();
        assert!(text.contains("C2 Antenna Direction Value\n"));
        assert!(text.ends_with("B  Elevation Antenna Direction Value\r"));
    }

    #[test]
    fn help_pages_are_plain_ascii() {
        let ctx = ProtocolContext::default();
        let page1 = build_response(&ctx, Command::Help1);
        let page2 = build_response(&ctx, Command::Help2);
        assert!(page1.is_ascii() && page2.is_ascii());

        let page1 = String::from_utf8(page1).unwrap();
        let page2 = String::from_utf8(page2).unwrap();
        assert!(page1.contains("N  Total number of setting angles in \"M\" mode"));
        assert!(page2.contains("\"W\" mode"));
        assert!(page2.contains("O2 Offset Calibration\n"));
        assert!(!page2.contains("02 Offset"));
    }

    #[test]
    fn help_page_3_reflects_live_state() {
        let mut ctx = ProtocolContext::new(ProtocolVariant::B);
        let text = String::from_utf8(reply(&mut ctx, b"H3\r")).unwrap();
        assert!(text.ends_with("mode 360 Degree\nN Center\r"));

        reply(&mut ctx, b"P45\r");
        reply(&mut ctx, b"Z\r");
        let text = String::from_utf8(reply(&mut ctx, b"H3\r")).unwrap();
        assert!(text.ends_with("mode 450 Degree\nS Center\r"));

        reply(&mut ctx, b"P36\r");
        let text = String::from_utf8(reply(&mut ctx, b"H3\r")).unwrap();
        assert!(text.ends_with("mode 360 Degree\nS Center\r"));
    }

    #[test]
    fn help_page_3_rejected_in_variant_a() {
        let mut ctx = ProtocolContext::default();
        assert_eq!(reply(&mut ctx, b"H3\r"), b"?>\r");
    }

    #[test]
    fn speed_reply_does_not_depend_on_level() {
        let ctx = ProtocolContext::default();
        assert_eq!(build_response(&ctx, Command::SetSpeed(RotationSpeed::High)), b"\r");
    }
}
