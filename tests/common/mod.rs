/// Lay out an archive: header, entry data, then the directory.
pub fn build_archive(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut data = vec![0; 4];
    let mut dir = Vec::new();
    dir.extend((files.len() as u32).to_le_bytes());
    for (name, contents) in files {
        dir.push(name.len() as u8);
        dir.extend(name.as_bytes());
        dir.extend((data.len() as u32).to_le_bytes());
        dir.extend((contents.len() as u32).to_le_bytes());
        data.extend(*contents);
    }
    let dir_offset = data.len() as u32;
    data[0..4].copy_from_slice(&dir_offset.to_le_bytes());
    data.extend(dir);
    data
}
