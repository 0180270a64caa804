use libc::{c_int, c_uint, c_uchar, c_ushort, c_void};

use libc::ioctl;
use libc;
use std::ptr;
use std::io;

#[cfg(not(any(target_env = "musl")))]
use libc::c_ulong;

use std::os::unix::io::AsRawFd;

use device::Device;
use scsi::Error;
use Direction;

// see scsi/sg.h

#[cfg(not(any(target_env = "musl")))]
const SG_IO: c_ulong = 0x2285;

#[cfg(any(target_env = "musl"))]
const SG_IO: c_int = 0x2285;

// scsi/scsi.h, the host byte of the result
const DID_TIME_OUT: c_ushort = 0x03;

const SENSE_LENGTH: usize = 32;

#[repr(C)]
#[derive(Debug)]
struct sg_io_hdr {
	interface_id:	c_int,	// [i] 'S' for SCSI generic (required)
	dxfer_direction:	c_int,	// [i] data transfer direction
	cmd_len:	c_uchar,	// [i] SCSI command length ( <= 16 bytes)
	mx_sb_len:	c_uchar,	// [i] max length to write to sbp
	iovec_count:	c_ushort,	// [i] 0 implies no scatter gather
	dxfer_len:	c_uint,	// [i] byte count of data transfer
	dxferp:	*mut c_void,	// [i], [*io] points to data transfer memory or scatter gather list
	cmdp:	*const c_uchar,	// [i], [*i] points to command to perform
	sbp:	*mut c_uchar,	// [i], [*o] points to sense_buffer memory
	timeout:	c_uint,	// [i] MAX_UINT->no timeout (unit: millisec)
	flags:	c_uint,	// [i] 0 -> default, see SG_FLAG...
	pack_id:	c_int,	// [i->o] unused internally (normally)
	usr_ptr:	*mut c_void,	// [i->o] unused internally
	status:	c_uchar,	// [o] scsi status
	masked_status:	c_uchar,	// [o] shifted, masked scsi status
	msg_status:	c_uchar,	// [o] messaging level data (optional)
	sb_len_wr:	c_uchar,	// [o] byte count actually written to sbp
	host_status:	c_ushort,	// [o] errors from host adapter
	driver_status:	c_ushort,	// [o] errors from software driver
	resid:	c_int,	// [o] dxfer_len - actual_transferred
	duration:	c_uint,	// [o] time taken by cmd (unit: millisec)
	info:	c_uint,	// [o] auxiliary information
}

impl Device {
	pub(crate) fn do_platform_cmd(&self, cdb: &[u8], dir: Direction, data: &mut [u8], timeout: u32) -> Result<(), Error> {
		let mut sense = [0u8; SENSE_LENGTH];

		let mut hdr = sg_io_hdr {
			interface_id:	'S' as c_int,

			dxfer_direction: match dir {
				// see scsi/sg.h, constants SG_DXFER_{NONE,TO_DEV,FROM_DEV}
				Direction::None => -1,
				Direction::Out => -2,
				Direction::In => -3,
			},
			dxferp:	if data.is_empty() { ptr::null_mut() } else { data.as_mut_ptr() as *mut c_void },
			dxfer_len:	data.len() as c_uint,
			resid:	0,

			sbp:	sense.as_mut_ptr(),
			mx_sb_len:	sense.len() as c_uchar,
			sb_len_wr:	0,

			cmdp:	cdb.as_ptr(),
			cmd_len:	cdb.len() as c_uchar,

			status:	0,
			host_status:	0,
			driver_status:	0,

			timeout:	timeout * 1000,
			duration:	0,

			iovec_count:	0,
			flags:	0,
			pack_id:	0,
			usr_ptr:	ptr::null_mut(),
			masked_status:	0,
			msg_status:	0,
			info:	0,
		};

		unsafe {
			if ioctl(self.file.as_raw_fd(), SG_IO, &mut hdr) == -1 {
				return Err(match io::Error::last_os_error().raw_os_error() {
					Some(libc::ETIMEDOUT) => Error::Timeout,
					Some(libc::EINVAL) => Error::InvalidParameter,
					_ => Error::Unknown,
				});
			}
		}

		if hdr.status != 0 {
			// the device itself rejected the command; let the caller decide how bad this is
			return Err(Error::Status(hdr.status));
		}
		if hdr.host_status == DID_TIME_OUT {
			return Err(Error::Timeout);
		}
		if hdr.host_status != 0 || hdr.driver_status != 0 {
			return Err(Error::Unknown);
		}

		Ok(())
	}
}
