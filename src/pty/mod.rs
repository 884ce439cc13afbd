use nix::libc;
use nix::pty;

use log::info;

use std::process::{Command, Stdio, Child};
use std::os::unix::process::CommandExt;
use std::os::fd::AsRawFd;
use std::io::{Error, ErrorKind};
use std::fs::File;

nix::ioctl_write_ptr_bad!(set_window_size, libc::TIOCSWINSZ, pty::Winsize);


pub struct Pty {
    pub child: Child,
    pub file: File,
}

impl Drop for Pty {
    fn drop(&mut self) {
        unsafe {
            libc::kill(self.child.id() as i32, libc::SIGHUP);
        }

        let _ = self.child.wait();
    }
}

impl Pty {
    pub fn new(shell: &str, command: Option<&str>) -> Result<Pty, Box<dyn std::error::Error>> {
        let fd = pty::openpty(None, None)?;
        let master = fd.master.as_raw_fd();
        let slave = fd.slave.as_raw_fd();

        let mut builder = Command::new(shell);

        if let Some(command) = command {
            builder.args(["-c", command]);
        }

        builder.stdin(Stdio::from(fd.slave.try_clone()?));
        builder.stdout(Stdio::from(fd.slave.try_clone()?));
        builder.stderr(Stdio::from(fd.slave));

        builder.env("TERM", "screen-256color");
        builder.env_remove("LINES");
        builder.env_remove("COLUMNS");

        unsafe {
            builder.pre_exec(move || {
                if libc::setsid() == -1 {
                    return Err(Error::new(ErrorKind::Other, "failed to set session id"));
                }

                if libc::ioctl(slave, libc::TIOCSCTTY, 0) == -1 {
                    return Err(Error::new(ErrorKind::Other, "ioctl failed"));
                }

                libc::close(slave);
                libc::close(master);

                Ok(())
            });
        }

        let child = builder.spawn()?;

        info!("shell started, pid {}", child.id());

        Ok(Pty {
            child,
            file: File::from(fd.master),
        })
    }

    pub fn resize(&mut self, width: u16, height: u16) -> Result<(), Box<dyn std::error::Error>> {
        unsafe {
            let winsize = libc::winsize {
                ws_row: height,
                ws_col: width,
                ws_xpixel: 0,
                ws_ypixel: 0,
            };

            set_window_size(self.file.as_raw_fd(), &winsize)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Read;

    #[test]
    fn spawn_and_reap() {
        let mut pty = Pty::new("/bin/sh", Some("exit 0")).unwrap();

        let status = pty.child.wait().unwrap();

        assert!(status.success());
    }

    #[test]
    fn command_output_reaches_master() {
        let mut pty = Pty::new("/bin/sh", Some("printf swordfish")).unwrap();

        pty.child.wait().unwrap();

        let mut output = String::new();
        let mut buffer = [0; 512];

        // EIO on the master just means the slave side is gone
        while let Ok(bytes) = pty.file.read(&mut buffer) {
            if bytes == 0 {
                break;
            }

            output.push_str(&String::from_utf8_lossy(&buffer[..bytes]));

            if output.contains("swordfish") {
                break;
            }
        }

        assert!(output.contains("swordfish"));
    }
}
