use serde_json::{Map, Value};

/// Longitude/latitude pair in degrees.
pub type LonLat = [f64; 2];
pub type Ring = Vec<LonLat>;
/// Outer ring first, then holes.
pub type Polygon = Vec<Ring>;

/// One country outline decoded from the boundary topology.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryShape {
    pub id: Option<String>,
    /// Name as spelled by the boundary file.
    pub name: String,
    /// Empty for features with a null geometry.
    pub polygons: Vec<Polygon>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TopologyError {
    NotATopology,
    MissingObject { name: String },
    InvalidArc { index: usize, reason: String },
    InvalidGeometry { index: usize, reason: String },
}

impl std::fmt::Display for TopologyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopologyError::NotATopology => write!(f, "expected a TopoJSON Topology"),
            TopologyError::MissingObject { name } => {
                write!(f, "topology has no object named {name:?}")
            }
            TopologyError::InvalidArc { index, reason } => {
                write!(f, "invalid arc at index {index}: {reason}")
            }
            TopologyError::InvalidGeometry { index, reason } => {
                write!(f, "invalid geometry at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for TopologyError {}

/// Decodes the features of `object` (a GeometryCollection) from a TopoJSON
/// payload into country outlines.
///
/// Quantized topologies (with a `transform`) are delta-decoded. Features
/// without a `name` property get an empty name rather than an error so the
/// map can still draw them.
pub fn decode_countries(payload: &str, object: &str) -> Result<Vec<CountryShape>, TopologyError> {
    let value: Value = serde_json::from_str(payload).map_err(|_| TopologyError::NotATopology)?;
    decode_countries_value(&value, object)
}

pub fn decode_countries_value(
    value: &Value,
    object: &str,
) -> Result<Vec<CountryShape>, TopologyError> {
    let obj = value.as_object().ok_or(TopologyError::NotATopology)?;
    if obj.get("type").and_then(|v| v.as_str()) != Some("Topology") {
        return Err(TopologyError::NotATopology);
    }

    let transform = parse_transform(obj)?;
    let arcs = decode_arcs(obj, transform)?;

    let collection = obj
        .get("objects")
        .and_then(|v| v.as_object())
        .and_then(|o| o.get(object))
        .and_then(|v| v.as_object())
        .ok_or_else(|| TopologyError::MissingObject {
            name: object.to_string(),
        })?;

    let geometries = match collection.get("type").and_then(|v| v.as_str()) {
        Some("GeometryCollection") => collection
            .get("geometries")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default(),
        Some(_) => vec![Value::Object(collection.clone())],
        None => {
            return Err(TopologyError::MissingObject {
                name: object.to_string(),
            });
        }
    };

    let mut out = Vec::with_capacity(geometries.len());
    for (index, geom) in geometries.iter().enumerate() {
        out.push(decode_geometry(index, geom, &arcs)?);
    }
    Ok(out)
}

#[derive(Debug, Copy, Clone)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

fn parse_transform(obj: &Map<String, Value>) -> Result<Option<Transform>, TopologyError> {
    let Some(t) = obj.get("transform") else {
        return Ok(None);
    };
    let pair = |key: &str| -> Option<[f64; 2]> {
        let arr = t.get(key)?.as_array()?;
        Some([arr.first()?.as_f64()?, arr.get(1)?.as_f64()?])
    };
    match (pair("scale"), pair("translate")) {
        (Some(scale), Some(translate)) => Ok(Some(Transform { scale, translate })),
        _ => Err(TopologyError::NotATopology),
    }
}

fn decode_arcs(
    obj: &Map<String, Value>,
    transform: Option<Transform>,
) -> Result<Vec<Vec<LonLat>>, TopologyError> {
    let raw = obj
        .get("arcs")
        .and_then(|v| v.as_array())
        .ok_or(TopologyError::NotATopology)?;

    let mut arcs = Vec::with_capacity(raw.len());
    for (index, arc) in raw.iter().enumerate() {
        let positions = arc.as_array().ok_or_else(|| TopologyError::InvalidArc {
            index,
            reason: "arc must be an array".to_string(),
        })?;

        let mut acc = [0.0f64; 2];
        let mut points = Vec::with_capacity(positions.len());
        for p in positions {
            let xy = p
                .as_array()
                .and_then(|a| Some([a.first()?.as_f64()?, a.get(1)?.as_f64()?]))
                .ok_or_else(|| TopologyError::InvalidArc {
                    index,
                    reason: "position must be [x, y]".to_string(),
                })?;
            let point = match transform {
                Some(t) => {
                    acc[0] += xy[0];
                    acc[1] += xy[1];
                    [
                        acc[0] * t.scale[0] + t.translate[0],
                        acc[1] * t.scale[1] + t.translate[1],
                    ]
                }
                None => xy,
            };
            points.push(point);
        }
        arcs.push(points);
    }
    Ok(arcs)
}

fn decode_geometry(
    index: usize,
    geom: &Value,
    arcs: &[Vec<LonLat>],
) -> Result<CountryShape, TopologyError> {
    let obj = geom
        .as_object()
        .ok_or_else(|| TopologyError::InvalidGeometry {
            index,
            reason: "geometry must be an object".to_string(),
        })?;

    let id = match obj.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    let name = obj
        .get("properties")
        .and_then(|p| p.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or_default()
        .to_string();

    let invalid = |reason: &str| TopologyError::InvalidGeometry {
        index,
        reason: reason.to_string(),
    };

    let polygons = match obj.get("type").and_then(|v| v.as_str()) {
        None | Some("null") => Vec::new(),
        Some("Polygon") => {
            let rings = obj
                .get("arcs")
                .and_then(|v| v.as_array())
                .ok_or_else(|| invalid("polygon without arcs"))?;
            vec![decode_polygon(rings, arcs).map_err(|r| invalid(&r))?]
        }
        Some("MultiPolygon") => {
            let polys = obj
                .get("arcs")
                .and_then(|v| v.as_array())
                .ok_or_else(|| invalid("multipolygon without arcs"))?;
            let mut out = Vec::with_capacity(polys.len());
            for poly in polys {
                let rings = poly
                    .as_array()
                    .ok_or_else(|| invalid("polygon must be an array of rings"))?;
                out.push(decode_polygon(rings, arcs).map_err(|r| invalid(&r))?);
            }
            out
        }
        Some(other) => return Err(invalid(&format!("unsupported geometry type {other}"))),
    };

    Ok(CountryShape { id, name, polygons })
}

fn decode_polygon(rings: &[Value], arcs: &[Vec<LonLat>]) -> Result<Polygon, String> {
    let mut polygon = Vec::with_capacity(rings.len());
    for ring in rings {
        let refs = ring
            .as_array()
            .ok_or_else(|| "ring must be an array of arc indices".to_string())?;
        let mut points: Ring = Vec::new();
        for r in refs {
            let i = r
                .as_i64()
                .ok_or_else(|| "arc index must be an integer".to_string())?;
            stitch_arc(&mut points, i, arcs)?;
        }
        polygon.push(points);
    }
    Ok(polygon)
}

/// Appends arc `i` to `ring`; negative indices (`!i`) are traversed backwards.
/// The first point of every arc after the first duplicates the previous end.
fn stitch_arc(ring: &mut Ring, i: i64, arcs: &[Vec<LonLat>]) -> Result<(), String> {
    let (idx, reversed) = if i < 0 { (!i, true) } else { (i, false) };
    let arc = usize::try_from(idx)
        .ok()
        .and_then(|idx| arcs.get(idx))
        .ok_or_else(|| format!("arc index {i} out of range"))?;

    let skip = usize::from(!ring.is_empty());
    if reversed {
        ring.extend(arc.iter().rev().skip(skip).copied());
    } else {
        ring.extend(arc.iter().skip(skip).copied());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{TopologyError, decode_countries};

    const TOPO: &str = r#"{
        "type": "Topology",
        "transform": {"scale": [1, 1], "translate": [0, 0]},
        "objects": {"countries": {"type": "GeometryCollection", "geometries": [
            {"type": "Polygon", "id": "484", "arcs": [[0, 1]], "properties": {"name": "Mexico"}},
            {"type": "Polygon", "arcs": [[-2, 2]], "properties": {"name": "Guatemala"}},
            {"type": null, "properties": {"name": "Nowhere"}}
        ]}},
        "arcs": [
            [[0, 0], [10, 0], [0, 10]],
            [[10, 10], [-10, 0], [0, -10]],
            [[0, 0], [5, -5], [5, 5]]
        ]
    }"#;

    #[test]
    fn delta_decodes_and_stitches_arcs() {
        let shapes = decode_countries(TOPO, "countries").unwrap();
        assert_eq!(shapes.len(), 3);

        let mexico = &shapes[0];
        assert_eq!(mexico.name, "Mexico");
        assert_eq!(mexico.id.as_deref(), Some("484"));
        assert_eq!(
            mexico.polygons[0][0],
            vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]]
        );
    }

    #[test]
    fn reversed_arcs_are_walked_backwards() {
        let shapes = decode_countries(TOPO, "countries").unwrap();
        let ring = &shapes[1].polygons[0][0];
        assert_eq!(ring.first(), Some(&[0.0, 0.0]));
        assert_eq!(ring[1], [0.0, 10.0]);
        assert_eq!(ring[2], [10.0, 10.0]);
        assert_eq!(ring.len(), 5);
    }

    #[test]
    fn null_geometry_still_yields_a_named_shape() {
        let shapes = decode_countries(TOPO, "countries").unwrap();
        assert_eq!(shapes[2].name, "Nowhere");
        assert!(shapes[2].polygons.is_empty());
    }

    #[test]
    fn missing_object_is_reported() {
        let err = decode_countries(TOPO, "land").unwrap_err();
        assert_eq!(
            err,
            TopologyError::MissingObject {
                name: "land".to_string()
            }
        );
    }

    #[test]
    fn out_of_range_arc_is_an_error() {
        let bad = TOPO.replace("[[0, 1]]", "[[0, 7]]");
        assert!(matches!(
            decode_countries(&bad, "countries"),
            Err(TopologyError::InvalidGeometry { index: 0, .. })
        ));
    }
}
