//! Frame transports: the serial link and plain writers.
//!
//! A transport owns its handle for the whole run. Dropping it closes the
//! handle, on success and on every error path.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use posewire_protocol::EncodedFrame;
use tracing::info;

use crate::error::{BridgeError, BridgeResult};

/// Baud rates the serial transport can configure.
pub const SUPPORTED_BAUD_RATES: [u32; 6] = [9_600, 19_200, 38_400, 57_600, 115_200, 230_400];

/// Sink for encoded frames.
pub trait Transport {
    /// Write one frame as hex tokens and flush it before returning.
    fn send_frame(&mut self, frame: &EncodedFrame) -> BridgeResult<()>;

    /// Human-readable name for logs.
    fn name(&self) -> &str;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send_frame(&mut self, frame: &EncodedFrame) -> BridgeResult<()> {
        (**self).send_frame(frame)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Writes tokens to any [`Write`] (stdout, a file, an already configured tty).
#[derive(Debug)]
pub struct WriterTransport<W: Write> {
    writer: W,
    name: String,
}

impl<W: Write> WriterTransport<W> {
    pub fn new(writer: W, name: impl Into<String>) -> Self {
        Self {
            writer,
            name: name.into(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Transport for WriterTransport<W> {
    fn send_frame(&mut self, frame: &EncodedFrame) -> BridgeResult<()> {
        write!(self.writer, "{}", frame.tokens()).map_err(BridgeError::Transport)?;
        self.writer.flush().map_err(BridgeError::Transport)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Open a serial device, switch it to raw mode at `baud`.
///
/// The open itself is non-blocking so a line without carrier cannot stall
/// it; blocking writes are restored once the port is configured.
#[cfg(unix)]
pub fn open_serial(device: &Path, baud: u32) -> BridgeResult<WriterTransport<File>> {
    use nix::fcntl::{FcntlArg, OFlag, fcntl};
    use nix::sys::termios::{self, SetArg};
    use std::fs::OpenOptions;
    use std::os::unix::fs::OpenOptionsExt;

    let rate = baud_rate(baud).ok_or(BridgeError::UnsupportedBaud(baud))?;

    let file = OpenOptions::new()
        .write(true)
        .custom_flags(serial_open_flags().bits())
        .open(device)
        .map_err(|e| BridgeError::Serial(format!("{}: {e}", device.display())))?;

    let serial_err = |e: nix::errno::Errno| BridgeError::Serial(format!("{}: {e}", device.display()));
    let mut settings = termios::tcgetattr(&file).map_err(serial_err)?;
    termios::cfmakeraw(&mut settings);
    settings.control_flags = raw_control_flags(settings.control_flags);
    termios::cfsetspeed(&mut settings, rate).map_err(serial_err)?;
    termios::tcsetattr(&file, SetArg::TCSANOW, &settings).map_err(serial_err)?;

    let status = fcntl(&file, FcntlArg::F_GETFL).map_err(serial_err)?;
    let blocking = OFlag::from_bits_truncate(status) - OFlag::O_NONBLOCK;
    fcntl(&file, FcntlArg::F_SETFL(blocking)).map_err(serial_err)?;

    info!(device = %device.display(), baud, "Serial port opened");
    Ok(WriterTransport::new(file, device.display().to_string()))
}

/// Extra open flags: no controlling tty, no wait for carrier.
#[cfg(unix)]
fn serial_open_flags() -> nix::fcntl::OFlag {
    use nix::fcntl::OFlag;

    OFlag::O_NOCTTY | OFlag::O_NONBLOCK
}

/// Ignore modem control lines, enable the receiver, one stop bit.
#[cfg(unix)]
fn raw_control_flags(
    flags: nix::sys::termios::ControlFlags,
) -> nix::sys::termios::ControlFlags {
    use nix::sys::termios::ControlFlags;

    (flags | ControlFlags::CLOCAL | ControlFlags::CREAD) - ControlFlags::CSTOPB
}

#[cfg(not(unix))]
pub fn open_serial(device: &Path, _baud: u32) -> BridgeResult<WriterTransport<File>> {
    Err(BridgeError::Serial(format!(
        "{}: serial devices are only supported on unix targets",
        device.display()
    )))
}

#[cfg(unix)]
fn baud_rate(baud: u32) -> Option<nix::sys::termios::BaudRate> {
    use nix::sys::termios::BaudRate;

    match baud {
        9_600 => Some(BaudRate::B9600),
        19_200 => Some(BaudRate::B19200),
        38_400 => Some(BaudRate::B38400),
        57_600 => Some(BaudRate::B57600),
        115_200 => Some(BaudRate::B115200),
        230_400 => Some(BaudRate::B230400),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posewire_protocol::{PoseSample, encode_sample};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "link down",
            ))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_transport_writes_tokens() -> TestResult {
        let mut transport = WriterTransport::new(Vec::new(), "memory");
        let frame = encode_sample(&PoseSample::default());
        transport.send_frame(&frame)?;
        transport.send_frame(&frame)?;
        let written = String::from_utf8(transport.into_inner())?;
        assert_eq!(written, frame.to_hex_string().repeat(2));
        Ok(())
    }

    #[test]
    fn test_writer_transport_reports_failure() {
        let mut transport = WriterTransport::new(FailingWriter, "broken");
        let frame = encode_sample(&PoseSample::default());
        let result = transport.send_frame(&frame);
        assert!(matches!(result, Err(BridgeError::Transport(_))));
        assert_eq!(transport.name(), "broken");
    }

    #[test]
    fn test_boxed_transport_delegates() -> TestResult {
        let mut boxed: Box<dyn Transport> = Box::new(WriterTransport::new(Vec::new(), "boxed"));
        boxed.send_frame(&encode_sample(&PoseSample::default()))?;
        assert_eq!(boxed.name(), "boxed");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_supported_rates_all_map() {
        for baud in SUPPORTED_BAUD_RATES {
            assert!(baud_rate(baud).is_some(), "{baud}");
        }
        assert!(baud_rate(12_345).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_open_serial_rejects_unsupported_baud() {
        let result = open_serial(Path::new("/dev/null"), 1_234);
        assert!(matches!(result, Err(BridgeError::UnsupportedBaud(1_234))));
    }

    #[cfg(unix)]
    #[test]
    fn test_raw_control_flags_ignore_carrier() {
        use nix::sys::termios::ControlFlags;

        let flags = raw_control_flags(ControlFlags::CSTOPB | ControlFlags::HUPCL);
        assert!(flags.contains(ControlFlags::CLOCAL | ControlFlags::CREAD));
        assert!(!flags.contains(ControlFlags::CSTOPB));
        assert!(flags.contains(ControlFlags::HUPCL));
    }

    #[cfg(unix)]
    #[test]
    fn test_serial_open_does_not_wait_for_carrier() {
        use nix::fcntl::OFlag;

        let flags = serial_open_flags();
        assert!(flags.contains(OFlag::O_NOCTTY));
        assert!(flags.contains(OFlag::O_NONBLOCK));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_open_serial_configures_pty() -> TestResult {
        use nix::fcntl::{FcntlArg, OFlag, fcntl};
        use nix::sys::termios::{self, ControlFlags, SetArg};

        let pty = nix::pty::openpty(None, None)?;
        // A tty left without CLOCAL and with two stop bits by a previous user.
        let mut previous = termios::tcgetattr(&pty.slave)?;
        previous.control_flags.remove(ControlFlags::CLOCAL);
        previous.control_flags.insert(ControlFlags::CSTOPB);
        termios::tcsetattr(&pty.slave, SetArg::TCSANOW, &previous)?;

        let path = nix::unistd::ttyname(&pty.slave)?;
        let mut transport = open_serial(&path, 115_200)?;

        let file = transport.get_ref();
        let settings = termios::tcgetattr(file)?;
        assert!(settings.control_flags.contains(ControlFlags::CLOCAL));
        assert!(settings.control_flags.contains(ControlFlags::CREAD));
        assert!(!settings.control_flags.contains(ControlFlags::CSTOPB));
        assert_eq!(
            termios::cfgetospeed(&settings),
            nix::sys::termios::BaudRate::B115200
        );

        let status = OFlag::from_bits_truncate(fcntl(file, FcntlArg::F_GETFL)?);
        assert!(!status.contains(OFlag::O_NONBLOCK));

        transport.send_frame(&encode_sample(&PoseSample::default()))?;
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_open_serial_rejects_non_tty() -> TestResult {
        let file = tempfile::NamedTempFile::new()?;
        let result = open_serial(file.path(), 115_200);
        assert!(matches!(result, Err(BridgeError::Serial(_))));
        Ok(())
    }
}
