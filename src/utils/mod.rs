pub fn parse_u64_list_csv(value: &str) -> Result<Vec<u64>, String> {
    let raw = value.trim();
    if raw.is_empty() {
        return Err("list is empty".to_string());
    }
    let mut out: Vec<u64> = Vec::new();
    for part in raw.split(',') {
        let item = part.trim();
        if item.is_empty() {
            continue;
        }
        let id: u64 = item
            .parse()
            .map_err(|_| format!("invalid problem id '{item}'"))?;
        if !out.contains(&id) {
            out.push(id);
        }
    }
    if out.is_empty() {
        return Err("list is empty".to_string());
    }
    Ok(out)
}

/// Parse an `ID:NAME` header-title override, e.g. `714:A`.
pub fn parse_problem_name_spec(value: &str) -> Result<(u64, String), String> {
    let (id_raw, name_raw) = value
        .split_once(':')
        .ok_or_else(|| "expected ID:NAME".to_string())?;
    let id: u64 = id_raw
        .trim()
        .parse()
        .map_err(|_| format!("invalid problem id '{}'", id_raw.trim()))?;
    let name = name_raw.trim();
    if name.is_empty() {
        return Err("NAME cannot be empty".to_string());
    }
    Ok((id, name.to_string()))
}
