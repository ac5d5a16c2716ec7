//! Reader for the fixed-format CVRP text layout.
//!
//! ```text
//! NAME : sample 1
//! TYPE : CVRP
//! DIMENSION : 6
//! EDGE_WEIGHT_TYPE : EUC_2D
//! CAPACITY : 30
//! NODE_COORD_SECTION
//! 1 38 46
//! ...
//! DEMAND_SECTION
//! 1 0
//! ...
//! DEPOT_SECTION
//! 1
//! -1
//! EOF
//! ```
//!
//! File ids are 1-based. The depot becomes node 0 (its listed demand is
//! ignored) and the remaining ids keep their relative order as nodes 1..n.
//! A missing `DEPOT_SECTION` means the first node is the depot. Unknown
//! header keys (`NAME`, `COMMENT`, ...) are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::error::RoutingError;
use crate::models::{Node, Problem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Coords,
    Demands,
    Depot,
    Done,
}

/// Parses a CVRP instance and builds a homogeneous fleet of `num_vehicles`.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::instance::read_cvrp;
///
/// let text = "\
/// NAME : tiny
/// TYPE : CVRP
/// DIMENSION : 3
/// EDGE_WEIGHT_TYPE : EUC_2D
/// CAPACITY : 20
/// NODE_COORD_SECTION
/// 1 0 0
/// 2 3 4
/// 3 0 8
/// DEMAND_SECTION
/// 1 0
/// 2 5
/// 3 7
/// DEPOT_SECTION
/// 1
/// -1
/// EOF
/// ";
/// let problem = read_cvrp(text.as_bytes(), 2).unwrap();
/// assert_eq!(problem.num_customers(), 2);
/// assert_eq!(problem.capacity(), 20);
/// assert!((problem.distances().get(0, 1) - 5.0).abs() < 1e-10);
/// ```
pub fn read_cvrp<R: BufRead>(reader: R, num_vehicles: usize) -> Result<Problem, RoutingError> {
    let mut section = Section::Header;
    let mut dimension: Option<usize> = None;
    let mut capacity: Option<i32> = None;
    let mut coords: Vec<Option<(f64, f64)>> = Vec::new();
    let mut demands: Vec<Option<i32>> = Vec::new();
    let mut depot: Option<usize> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let next = match line {
            "NODE_COORD_SECTION" => Some(Section::Coords),
            "DEMAND_SECTION" => Some(Section::Demands),
            "DEPOT_SECTION" => Some(Section::Depot),
            "EOF" => Some(Section::Done),
            _ => None,
        };
        if let Some(next) = next {
            if matches!(next, Section::Coords | Section::Demands) {
                let dim = dimension
                    .ok_or_else(|| RoutingError::parse(line_no, format!("{line} before DIMENSION")))?;
                coords.resize(dim, None);
                demands.resize(dim, None);
            }
            section = next;
            if section == Section::Done {
                break;
            }
            continue;
        }

        match section {
            Section::Header => {
                let (key, value) = line.split_once(':').ok_or_else(|| {
                    RoutingError::parse(line_no, format!("expected 'KEY : VALUE', got '{line}'"))
                })?;
                let value = value.trim();
                match key.trim() {
                    "DIMENSION" => dimension = Some(parse_field(value, line_no, "DIMENSION")?),
                    "CAPACITY" => capacity = Some(parse_field(value, line_no, "CAPACITY")?),
                    "TYPE" if value != "CVRP" => {
                        return Err(RoutingError::parse(
                            line_no,
                            format!("expecting 'CVRP' as TYPE, got '{value}'"),
                        ));
                    }
                    "EDGE_WEIGHT_TYPE" if value != "EUC_2D" => {
                        return Err(RoutingError::parse(
                            line_no,
                            format!("expecting 'EUC_2D' as EDGE_WEIGHT_TYPE, got '{value}'"),
                        ));
                    }
                    _ => {}
                }
            }
            Section::Coords => {
                let fields: Vec<&str> = line.split_whitespace().collect();
                if fields.len() != 3 {
                    return Err(RoutingError::parse(
                        line_no,
                        format!("unexpected coord data: '{line}'"),
                    ));
                }
                let slot = slot(fields[0], coords.len(), line_no)?;
                let x = parse_field(fields[1], line_no, "x coordinate")?;
                let y = parse_field(fields[2], line_no, "y coordinate")?;
                coords[slot] = Some((x, y));
            }
            Section::Demands => {
                let fields: Vec<&str> = line.split_whitespace().collect();
                if fields.len() != 2 {
                    return Err(RoutingError::parse(
                        line_no,
                        format!("unexpected demand data: '{line}'"),
                    ));
                }
                let slot = slot(fields[0], demands.len(), line_no)?;
                let demand: i32 = parse_field(fields[1], line_no, "demand")?;
                if demand < 0 {
                    return Err(RoutingError::parse(line_no, "negative demand"));
                }
                demands[slot] = Some(demand);
            }
            Section::Depot => {
                let id: i64 = parse_field(line, line_no, "depot id")?;
                if id == -1 {
                    continue;
                }
                if depot.is_some() {
                    return Err(RoutingError::parse(line_no, "only a single depot is supported"));
                }
                depot = Some(slot(line, coords.len(), line_no)?);
            }
            Section::Done => unreachable!("reading stops at EOF"),
        }
    }

    let capacity = capacity.ok_or_else(|| RoutingError::parse(0, "missing CAPACITY"))?;
    if dimension.is_none() {
        return Err(RoutingError::parse(0, "missing DIMENSION"));
    }
    let depot = depot.unwrap_or(0);

    let mut points = Vec::with_capacity(coords.len());
    for (slot, (coord, demand)) in coords.iter().zip(&demands).enumerate() {
        let (x, y) = coord.ok_or_else(|| {
            RoutingError::parse(0, format!("missing coordinates for node {}", slot + 1))
        })?;
        let demand = demand
            .ok_or_else(|| RoutingError::parse(0, format!("missing demand for node {}", slot + 1)))?;
        points.push((x, y, demand));
    }
    if points.is_empty() {
        return Err(RoutingError::parse(0, "missing NODE_COORD_SECTION"));
    }

    let (dx, dy, _) = points[depot];
    let mut nodes = Vec::with_capacity(points.len());
    nodes.push(Node::depot(dx, dy));
    for (slot, &(x, y, demand)) in points.iter().enumerate() {
        if slot != depot {
            nodes.push(Node::new(nodes.len(), x, y, demand));
        }
    }

    Ok(Problem::new(nodes, num_vehicles, capacity))
}

impl Problem {
    /// Parses an instance from text. See [`read_cvrp`].
    pub fn from_cvrp_str(text: &str, num_vehicles: usize) -> Result<Self, RoutingError> {
        read_cvrp(text.as_bytes(), num_vehicles)
    }

    /// Reads an instance file. See [`read_cvrp`].
    pub fn from_file(path: impl AsRef<Path>, num_vehicles: usize) -> Result<Self, RoutingError> {
        let file = File::open(path)?;
        read_cvrp(BufReader::new(file), num_vehicles)
    }
}

fn parse_field<T: FromStr>(value: &str, line: usize, what: &str) -> Result<T, RoutingError> {
    value
        .trim()
        .parse()
        .map_err(|_| RoutingError::parse(line, format!("cannot parse {what}: '{}'", value.trim())))
}

/// Converts a 1-based file id into a 0-based slot below `len`.
fn slot(id: &str, len: usize, line: usize) -> Result<usize, RoutingError> {
    let id: usize = parse_field(id, line, "id")?;
    if id == 0 || id > len {
        return Err(RoutingError::parse(line, format!("id {id} out of range 1..={len}")));
    }
    Ok(id - 1)
}
