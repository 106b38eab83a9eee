//! Uniform spatial grid over a fixed bounding region.
//!
//! A grid partitions an axis-aligned region into equally sized cells and
//! converts between world points, integer coordinate tuples, and flattened
//! cell ids (mixed-radix, dimension 0 fastest-varying). Construction fully
//! initializes the grid; there is no resizing and no mutation afterward,
//! so a grid can be shared freely between threads.

/// Offsets of the 26 face/edge/corner neighbors of a 3D cell.
const NEIGH_3D: [[isize; 3]; 26] = [
    [-1, 0, 0],
    [1, 0, 0],
    [0, -1, 0],
    [0, 1, 0],
    [-1, -1, 0],
    [-1, 1, 0],
    [1, -1, 0],
    [1, 1, 0],
    [-1, 0, -1],
    [1, 0, -1],
    [0, -1, -1],
    [0, 1, -1],
    [-1, -1, -1],
    [-1, 1, -1],
    [1, -1, -1],
    [1, 1, -1],
    [-1, 0, 1],
    [1, 0, 1],
    [0, -1, 1],
    [0, 1, 1],
    [-1, -1, 1],
    [-1, 1, 1],
    [1, -1, 1],
    [1, 1, 1],
    [0, 0, -1],
    [0, 0, 1],
];

/// Uniform N-dimensional grid.
#[derive(Clone, Debug)]
pub struct Grid {
    dims: Vec<usize>,
    min: Vec<f64>,
    max: Vec<f64>,
    units: Vec<f64>,
    cell_volume: f64,
    nr_cells: usize,
}

impl Grid {
    /// Builds a grid with `dims[i]` cells along axis `i` spanning
    /// `min[i]..max[i]`. The three slices must have equal, nonzero length
    /// and every cell count must be nonzero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(dims: &[usize], min: &[f64], max: &[f64]) -> Self {
        let mut units = Vec::with_capacity(dims.len());
        let mut cell_volume = 1.0;
        let mut nr_cells = 1;

        for i in 0..dims.len() {
            let unit = (max[i] - min[i]) / dims[i] as f64;
            units.push(unit);
            cell_volume *= unit;
            nr_cells *= dims[i];
        }

        Self {
            dims: dims.to_vec(),
            min: min.to_vec(),
            max: max.to_vec(),
            units,
            cell_volume,
            nr_cells,
        }
    }

    /// 2D convenience constructor.
    #[must_use]
    pub fn new_2d(dims_x: usize, dims_y: usize, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(&[dims_x, dims_y], &[min_x, min_y], &[max_x, max_y])
    }

    /// Total number of cells.
    #[must_use]
    pub fn nr_cells(&self) -> usize {
        self.nr_cells
    }

    /// Number of dimensions fixed at construction.
    #[must_use]
    pub fn nr_dims(&self) -> usize {
        self.dims.len()
    }

    /// Per-axis cell counts.
    #[must_use]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Per-axis lower bounds.
    #[must_use]
    pub fn min(&self) -> &[f64] {
        &self.min
    }

    /// Per-axis upper bounds.
    #[must_use]
    pub fn max(&self) -> &[f64] {
        &self.max
    }

    /// Per-axis cell extents, `(max - min) / dims` each.
    #[must_use]
    pub fn units(&self) -> &[f64] {
        &self.units
    }

    /// Product of the per-axis cell extents.
    #[must_use]
    pub fn cell_volume(&self) -> f64 {
        self.cell_volume
    }

    #[allow(clippy::cast_possible_truncation)]
    fn coord(x: f64, min: f64, unit: f64, count: usize) -> usize {
        let c = ((x - min) / unit) as i64;
        if c < 0 {
            0
        } else if c as usize > count - 1 {
            count - 1
        } else {
            c as usize
        }
    }

    /// Integer coordinates of the cell containing `p`. Points outside the
    /// grid clamp to the nearest boundary cell on each axis.
    #[must_use]
    pub fn coords_of(&self, p: &[f64]) -> Vec<usize> {
        (0..self.dims.len())
            .map(|i| Self::coord(p[i], self.min[i], self.units[i], self.dims[i]))
            .collect()
    }

    /// Flattened cell id of a coordinate tuple: mixed-radix encoding with
    /// the per-axis counts as radices, dimension 0 fastest-varying.
    #[must_use]
    pub fn cell_id_from_coords(&self, coords: &[usize]) -> usize {
        let mut factor = 1;
        let mut id = 0;
        for i in 0..self.dims.len() {
            id += coords[i] * factor;
            factor *= self.dims[i];
        }
        id
    }

    /// Coordinate tuple of a flattened cell id (mixed-radix decode).
    #[must_use]
    pub fn coords_from_cell_id(&self, id: usize) -> Vec<usize> {
        let mut factor = id;
        self.dims
            .iter()
            .map(|&d| {
                let c = factor % d;
                factor /= d;
                c
            })
            .collect()
    }

    /// Cell id of the cell containing `p`, with the same clamping as
    /// [`coords_of`](Self::coords_of).
    #[must_use]
    pub fn cell_id_of(&self, p: &[f64]) -> usize {
        let mut factor = 1;
        let mut id = 0;
        for i in 0..self.dims.len() {
            id += factor * Self::coord(p[i], self.min[i], self.units[i], self.dims[i]);
            factor *= self.dims[i];
        }
        id
    }

    /// World-space box of the cell at `coords` as min/max corner vectors.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_from_coords(&self, coords: &[usize]) -> (Vec<f64>, Vec<f64>) {
        let mut min = Vec::with_capacity(self.dims.len());
        let mut max = Vec::with_capacity(self.dims.len());
        for i in 0..self.dims.len() {
            let lo = self.min[i] + self.units[i] * coords[i] as f64;
            min.push(lo);
            max.push(lo + self.units[i]);
        }
        (min, max)
    }

    /// World-space box of the cell with the given id.
    #[must_use]
    pub fn cell_from_id(&self, id: usize) -> (Vec<f64>, Vec<f64>) {
        self.cell_from_coords(&self.coords_from_cell_id(id))
    }

    /// World-space center of the cell at `coords`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_center_from_coords(&self, coords: &[usize]) -> Vec<f64> {
        (0..self.dims.len())
            .map(|i| self.min[i] + (0.5 + coords[i] as f64) * self.units[i])
            .collect()
    }

    /// World-space center of the cell with the given id.
    #[must_use]
    pub fn cell_center_from_id(&self, id: usize) -> Vec<f64> {
        self.cell_center_from_coords(&self.coords_from_cell_id(id))
    }

    /// Tests whether `p` lies inside the grid bounds (all axes).
    #[must_use]
    pub fn is_point_inside(&self, p: &[f64]) -> bool {
        (0..self.dims.len()).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }

    /// Tests whether `p` lies inside the cell at `coords`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn is_point_inside_cell(&self, coords: &[usize], p: &[f64]) -> bool {
        (0..self.dims.len()).all(|i| {
            let lo = self.min[i] + self.units[i] * coords[i] as f64;
            p[i] >= lo && p[i] <= lo + self.units[i]
        })
    }

    /// Ids of the cells adjacent to the cell `id` at `coords`.
    ///
    /// 2D grids include the four diagonal neighbors (8-connectivity) via an
    /// explicit special case; 3D grids enumerate all 26 neighbors from an
    /// offset table. Neighbors outside the grid are omitted; there is no
    /// wraparound. Other dimensionalities return an empty list.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn neighbors(&self, id: usize, coords: &[usize]) -> Vec<usize> {
        let n = self.dims.len();
        let mut neighs = Vec::new();

        if n == 2 {
            let mut factor = 1;
            for i in 0..2 {
                if coords[i] + 1 < self.dims[i] {
                    neighs.push(id + factor);
                    // Diagonals enter through the y axis pass.
                    if i == 1 && coords[0] >= 1 {
                        neighs.push(id + factor - 1);
                    }
                    if i == 1 && coords[0] + 1 < self.dims[0] {
                        neighs.push(id + factor + 1);
                    }
                }

                if coords[i] >= 1 {
                    neighs.push(id - factor);
                    if i == 1 && coords[0] >= 1 {
                        neighs.push(id - factor - 1);
                    }
                    if i == 1 && coords[0] + 1 < self.dims[0] {
                        neighs.push(id - factor + 1);
                    }
                }

                factor *= self.dims[i];
            }
        } else if n == 3 {
            for off in &NEIGH_3D {
                let inside = (0..3).all(|k| {
                    let c = coords[k] as isize + off[k];
                    c >= 0 && (c as usize) < self.dims[k]
                });
                if inside {
                    let delta = off[0]
                        + off[1] * self.dims[0] as isize
                        + off[2] * (self.dims[0] * self.dims[1]) as isize;
                    neighs.push((id as isize + delta) as usize);
                }
            }
        }

        neighs
    }
}
