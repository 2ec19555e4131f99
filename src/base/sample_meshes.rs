use gemlab::mesh::{Cell, Mesh, Point};
use gemlab::shapes::GeoKind;

/// Holds sample meshes for testing and demos
pub struct SampleMeshes {}

impl SampleMeshes {
    /// Returns a mesh with two Qua4 cells stacked vertically
    ///
    /// ```text
    /// 1.0  5--------4
    ///      |        |
    ///      |  [1]   |
    ///      |  (1)   |
    /// 0.5  3--------2    [#] indicates id
    ///      |        |    (#) indicates attribute
    ///      |  [0]   |
    ///      |  (1)   |
    /// 0.0  0--------1
    ///     0.0      0.5
    /// ```
    #[rustfmt::skip]
    pub fn column_two_qua4() -> Mesh {
        Mesh {
            ndim: 2,
            points: vec![
                Point { id: 0, marker: 0, coords: vec![0.0, 0.0] },
                Point { id: 1, marker: 0, coords: vec![0.5, 0.0] },
                Point { id: 2, marker: 0, coords: vec![0.5, 0.5] },
                Point { id: 3, marker: 0, coords: vec![0.0, 0.5] },
                Point { id: 4, marker: 0, coords: vec![0.5, 1.0] },
                Point { id: 5, marker: 0, coords: vec![0.0, 1.0] },
            ],
            cells: vec![
                Cell { id: 0, attribute: 1, kind: GeoKind::Qua4, points: vec![0, 1, 2, 3] },
                Cell { id: 1, attribute: 1, kind: GeoKind::Qua4, points: vec![3, 2, 4, 5] },
            ],
        }
    }

    /// Generates a structured rectangle mesh with Qua4 cells
    ///
    /// ```text
    /// ly   +----+----+----+
    ///      |    |    |    |     nx = number of cells along x
    ///      +----+----+----+     ny = number of cells along y
    ///      |    |    |    |
    /// 0.0  +----+----+----+
    ///     0.0            lx
    /// ```
    ///
    /// # Panics
    ///
    /// A panic will occur if nx or ny is zero or the dimensions are not positive.
    pub fn rectangle_qua4(lx: f64, ly: f64, nx: usize, ny: usize) -> Mesh {
        assert!(lx > 0.0 && ly > 0.0);
        assert!(nx > 0 && ny > 0);
        let dx = lx / (nx as f64);
        let dy = ly / (ny as f64);
        let npoint = (nx + 1) * (ny + 1);
        let mut points = Vec::with_capacity(npoint);
        for j in 0..(ny + 1) {
            for i in 0..(nx + 1) {
                points.push(Point {
                    id: i + j * (nx + 1),
                    marker: 0,
                    coords: vec![(i as f64) * dx, (j as f64) * dy],
                });
            }
        }
        let mut cells = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                let p0 = i + j * (nx + 1);
                cells.push(Cell {
                    id: i + j * nx,
                    attribute: 1,
                    kind: GeoKind::Qua4,
                    points: vec![p0, p0 + 1, p0 + nx + 2, p0 + nx + 1],
                });
            }
        }
        Mesh { ndim: 2, points, cells }
    }

    /// Generates a structured block mesh with Hex8 cells
    pub fn block_hex8(lx: f64, ly: f64, lz: f64, nx: usize, ny: usize, nz: usize) -> Mesh {
        assert!(lx > 0.0 && ly > 0.0 && lz > 0.0);
        assert!(nx > 0 && ny > 0 && nz > 0);
        let (dx, dy, dz) = (lx / (nx as f64), ly / (ny as f64), lz / (nz as f64));
        let (mx, my) = (nx + 1, ny + 1);
        let npoint = mx * my * (nz + 1);
        let mut points = Vec::with_capacity(npoint);
        for k in 0..(nz + 1) {
            for j in 0..my {
                for i in 0..mx {
                    points.push(Point {
                        id: i + j * mx + k * mx * my,
                        marker: 0,
                        coords: vec![(i as f64) * dx, (j as f64) * dy, (k as f64) * dz],
                    });
                }
            }
        }
        let mut cells = Vec::with_capacity(nx * ny * nz);
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let p0 = i + j * mx + k * mx * my;
                    let p4 = p0 + mx * my;
                    cells.push(Cell {
                        id: i + j * nx + k * nx * ny,
                        attribute: 1,
                        kind: GeoKind::Hex8,
                        points: vec![p0, p0 + 1, p0 + mx + 1, p0 + mx, p4, p4 + 1, p4 + mx + 1, p4 + mx],
                    });
                }
            }
        }
        Mesh { ndim: 3, points, cells }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
