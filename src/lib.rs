/*!
This crate tells you whether a removable device attached over USB actually is
(or at least behaves like) a rotating hard disk with ATA/S.M.A.R.T. capability.

It does so by pushing a raw ATA IDENTIFY DEVICE command through whichever
USB-to-ATA/SATA bridge chip the adapter carries — each vendor implements its
own, mutually incompatible, passthrough dialect — and by combining that with a
few low-confidence hints (drive-type flag, model string, USB vendor id) into a
single likelihood score. The intended consumer is a formatting tool that wants
to warn the user before it wipes what might be someone's backup disk.

## Example

```no_run
use usbhdd::Device;
use usbhdd::identify;
use usbhdd::score;

let dev = Device::open("/dev/sdb").unwrap();
let id = identify::identify_device(&dev, identify::DEFAULT_TIMEOUT).unwrap();
print!("answered via {}, S.M.A.R.T.: {}\n", id.bridge, id.id.smart);

let score = score::is_hdd(true, 0x152d, &id.id.model);
```

For more, dive into documentation for the module you're interested in.
*/

#![warn(missing_debug_implementations)]

#[cfg(feature = "serializable")]
#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate quick_error;
#[macro_use]
extern crate log;
#[macro_use]
extern crate static_assertions;

#[cfg(unix)]
extern crate libc;
#[cfg(windows)]
extern crate winapi;

/// Data transfer direction, as seen from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction { None, In, Out }

pub mod device;
pub use device::Device;

pub mod ata;
pub mod scsi;
pub mod bridge;
pub mod identify;
pub mod score;

mod utils;
