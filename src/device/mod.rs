/*!
Thin wrapper for the platform-specific device handle.

Passthrough commands are issued against an already-opened handle to the whole
physical device (e.g. `/dev/sdb`, `\\.\PhysicalDrive1`), opened read/write: the
bridges do not merely read the medium, they talk to the controller behind it.
This module owns opening and closing that handle and nothing else; actual
commands are sent through [`scsi`](../scsi/index.html) and the porcelain on top
of it.

## Example

See [parent module](../index.html).
*/

#[cfg(unix)]
pub mod linux;
#[cfg(unix)]
pub use self::linux::*;

#[cfg(windows)]
pub mod windows;
#[cfg(windows)]
pub use self::windows::*;
