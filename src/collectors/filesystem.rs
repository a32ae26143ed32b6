use crate::error::CollectError;
use crate::models::filesystem::CapacityReading;
use std::path::Path;
use tracing::debug;

/// Pseudo and memory-backed filesystems: no capacity worth showing.
const SKIP_FS: &[&str] = &[
    "proc", "sysfs", "devpts", "tmpfs", "devtmpfs", "ramfs", "cgroup", "cgroup2",
    "pstore", "efivarfs", "securityfs", "debugfs", "tracefs", "bpf",
    "hugetlbfs", "mqueue", "fusectl", "configfs", "binfmt_misc",
    "overlay", "nsfs", "rpc_pipefs", "autofs", "squashfs",
];

/// Filesystems backed by a remote server; shown only when asked for.
const NETWORK_FS: &[&str] = &[
    "nfs", "nfs4", "cifs", "smb3", "smbfs", "ceph", "glusterfs",
    "fuse.sshfs", "fuse.glusterfs", "9p", "afs",
];

const SKIP_MOUNT_PREFIX: &[&str] = &[
    "/proc", "/sys", "/dev", "/run/user", "/snap",
];

/// One /proc/mounts entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MountEntry {
    pub device:  String,
    pub mount:   String,
    pub fs_type: String,
}

pub fn is_network_fs(fs_type: &str) -> bool {
    NETWORK_FS.contains(&fs_type)
}

/// Whether a mount entry should get a capacity reading at all.
pub fn wanted(entry: &MountEntry, include_network: bool) -> bool {
    if SKIP_FS.contains(&entry.fs_type.as_str()) { return false; }
    if is_network_fs(&entry.fs_type) && !include_network { return false; }
    if SKIP_MOUNT_PREFIX.iter().any(|p| entry.mount == *p || entry.mount.starts_with(&format!("{}/", p))) {
        return false;
    }
    // Skip loop-mounted images (snaps and the like)
    !entry.device.starts_with("/dev/loop")
}

/// Read capacities for every wanted mount. A mount whose statvfs fails is
/// left out; the rest are still returned.
pub fn read_filesystems(
    mounts_path: &Path,
    include_network: bool,
) -> Result<Vec<CapacityReading>, CollectError> {
    let content = std::fs::read_to_string(mounts_path)
        .map_err(|e| CollectError::read(mounts_path, e))?;
    let mut out: Vec<CapacityReading> = Vec::new();

    for entry in parse_mounts(&content) {
        if !wanted(&entry, include_network) { continue; }
        match statvfs_for(&entry) {
            Ok(cap) => {
                // Stacked mounts: the last one listed is the one visible.
                out.retain(|c| c.mount_point != cap.mount_point);
                out.push(cap);
            }
            Err(e) => debug!("{}", e),
        }
    }
    Ok(out)
}

pub fn parse_mounts(content: &str) -> Vec<MountEntry> {
    let mut v = Vec::new();
    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 { continue; }
        v.push(MountEntry {
            device:  unescape(fields[0]),
            mount:   unescape(fields[1]),
            fs_type: fields[2].to_string(),
        });
    }
    v
}

/// Decode the octal escapes the kernel uses for whitespace and backslashes
/// in /proc/mounts ("\040" for a space).
fn unescape(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len()
            && bytes[i + 1..i + 4].iter().all(|b| (b'0'..=b'7').contains(b)) {
            let code = (bytes[i + 1] - b'0') as u32 * 64
                + (bytes[i + 2] - b'0') as u32 * 8
                + (bytes[i + 3] - b'0') as u32;
            if let Ok(b) = u8::try_from(code) {
                out.push(b);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Name under which the mount's block device appears in /proc/diskstats.
///
/// Symlinked nodes (/dev/mapper/*, /dev/disk/by-uuid/*) resolve to their
/// kernel name; anything else keeps its final path component.
pub fn io_device_name(device: &str) -> String {
    let path = Path::new(device);
    if !path.is_absolute() {
        return device.to_string();
    }
    let real = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    match real.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None       => device.to_string(),
    }
}

fn statvfs_for(entry: &MountEntry) -> Result<CapacityReading, CollectError> {
    use nix::sys::statvfs::statvfs;
    let stat = statvfs(entry.mount.as_str()).map_err(|source| CollectError::Statvfs {
        mount: entry.mount.clone(),
        source,
    })?;

    let frsize = stat.fragment_size() as u64;
    let total_bytes     = stat.blocks() as u64           * frsize;
    let available_bytes = stat.blocks_available() as u64 * frsize;
    let free_bytes      = stat.blocks_free() as u64      * frsize;
    let used_bytes      = total_bytes.saturating_sub(free_bytes);

    Ok(CapacityReading {
        device:      entry.device.clone(),
        mount_point: entry.mount.clone(),
        fs_type:     entry.fs_type.clone(),
        io_device:   io_device_name(&entry.device),
        total_bytes,
        used_bytes,
        available_bytes,
    })
}
