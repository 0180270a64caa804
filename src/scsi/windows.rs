use std::io;
use std::mem;
use std::os::raw::c_void;
use std::os::windows::io::AsRawHandle;

use winapi::um::ioapiset::DeviceIoControl;
use winapi::shared::minwindef::DWORD;
use winapi::shared::winerror::{ERROR_SEM_TIMEOUT, ERROR_INVALID_PARAMETER};

use device::Device;
use scsi::Error;
use Direction;

// see ntddscsi.h; CTL_CODE(IOCTL_SCSI_BASE, 0x0405, METHOD_BUFFERED, FILE_READ_ACCESS | FILE_WRITE_ACCESS)
const IOCTL_SCSI_PASS_THROUGH_DIRECT: DWORD = 0x4d014;

const SCSI_IOCTL_DATA_OUT: u8 = 0;
const SCSI_IOCTL_DATA_IN: u8 = 1;
const SCSI_IOCTL_DATA_UNSPECIFIED: u8 = 2;

const SENSE_LENGTH: usize = 32;

// this layout is an ABI contract with the storage port driver: field order,
// widths and the position of the sense buffer right after the fixed header
// must match ntddscsi.h exactly
#[repr(C)]
struct ScsiPassThroughDirect {
	length:	u16,	// [i] sizeof(SCSI_PASS_THROUGH_DIRECT)
	scsi_status:	u8,	// [o] status byte the device replied with
	path_id:	u8,	// [i] fixed single-LUN addressing: 0/0/0
	target_id:	u8,
	lun:	u8,
	cdb_length:	u8,	// [i] 1 to 16
	sense_info_length:	u8,
	data_in:	u8,	// [i] one of SCSI_IOCTL_DATA_*
	data_transfer_length:	u32,	// [i] effectively 16-bit, see scsi::validate()
	time_out_value:	u32,	// [i] seconds
	data_buffer:	*mut c_void,
	sense_info_offset:	u32,	// [i] from the start of this struct
	cdb:	[u8; 16],
}

#[repr(C)]
struct ScsiPassThroughDirectWithBuffer {
	sptd:	ScsiPassThroughDirect,
	filler:	u32,	// realign the sense buffer
	sense_buf:	[u8; SENSE_LENGTH],
}

impl Device {
	pub(crate) fn do_platform_cmd(&self, cdb: &[u8], dir: Direction, data: &mut [u8], timeout: u32) -> Result<(), Error> {
		let mut sptdwb = ScsiPassThroughDirectWithBuffer {
			sptd: ScsiPassThroughDirect {
				length: mem::size_of::<ScsiPassThroughDirect>() as u16,
				scsi_status: 0,
				path_id: 0,
				target_id: 0,
				lun: 0,
				cdb_length: cdb.len() as u8,
				sense_info_length: SENSE_LENGTH as u8,
				data_in: match dir {
					Direction::Out => SCSI_IOCTL_DATA_OUT,
					Direction::In => SCSI_IOCTL_DATA_IN,
					Direction::None => SCSI_IOCTL_DATA_UNSPECIFIED,
				},
				data_transfer_length: data.len() as u32,
				time_out_value: timeout,
				data_buffer: if data.is_empty() { 0 as *mut c_void } else { data.as_mut_ptr() as *mut c_void },
				sense_info_offset: 0, // filled in below
				cdb: [0; 16],
			},
			filler: 0,
			sense_buf: [0; SENSE_LENGTH],
		};

		sptdwb.sptd.sense_info_offset =
			(&sptdwb.sense_buf as *const _ as usize - &sptdwb as *const _ as usize) as u32;
		sptdwb.sptd.cdb[..cdb.len()].copy_from_slice(cdb);

		let size = mem::size_of::<ScsiPassThroughDirectWithBuffer>() as DWORD;
		let mut returned: DWORD = 0;

		let ok = unsafe {
			DeviceIoControl(
				self.file.as_raw_handle() as *mut _,
				IOCTL_SCSI_PASS_THROUGH_DIRECT,
				&mut sptdwb as *mut _ as *mut _, size,
				&mut sptdwb as *mut _ as *mut _, size,
				&mut returned,
				0 as *mut _,
			)
		} != 0;

		if ok && sptdwb.sptd.scsi_status == 0 {
			return Ok(());
		}

		if sptdwb.sptd.scsi_status != 0 {
			// the device itself rejected the command; let the caller decide how bad this is
			Err(Error::Status(sptdwb.sptd.scsi_status))
		} else {
			Err(match io::Error::last_os_error().raw_os_error() {
				Some(e) if e as DWORD == ERROR_SEM_TIMEOUT => Error::Timeout,
				Some(e) if e as DWORD == ERROR_INVALID_PARAMETER => Error::InvalidParameter,
				_ => Error::Unknown,
			})
		}
	}
}
